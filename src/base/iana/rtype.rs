//! Resource record types.

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource record types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// data it contains. This type wraps that value. Only the record types
    /// this crate can encounter in practice are given mnemonics; any other
    /// value is still representable and will be treated as opaque record
    /// data by the parsing machinery.
    ///
    /// For the currently registered values see the [IANA registration].
    ///
    /// [IANA registration]: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Server selection.
    (SRV => 33, "SRV")

    /// Option pseudo record type.
    (OPT => 41, "OPT")

    /// Delegation signer.
    (DS => 43, "DS")

    /// DNSSEC signature.
    (RRSIG => 46, "RRSIG")

    /// Proof of non-existence of a name.
    (NSEC => 47, "NSEC")

    /// DNSSEC public key.
    (DNSKEY => 48, "DNSKEY")

    /// Hashed proof of non-existence of a name.
    (NSEC3 => 50, "NSEC3")

    /// Parameters for NSEC3 hashing.
    (NSEC3PARAM => 51, "NSEC3PARAM")

    /// Transfer of an entire zone.
    (AXFR => 252, "AXFR")

    /// A request for all records the server has available.
    (ANY => 255, "ANY")
}

int_enum_str_with_prefix!(Rtype, "TYPE", b"TYPE", u16, "unknown record type");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_str() {
        assert_eq!(Rtype::from_str("NSEC3"), Ok(Rtype::NSEC3));
        assert_eq!(Rtype::from_str("nsec3"), Ok(Rtype::NSEC3));
        assert_eq!(Rtype::from_str("TYPE1234"), Ok(Rtype::from_int(1234)));
        assert_eq!(Rtype::from_str("type50"), Ok(Rtype::NSEC3));
        assert!(Rtype::from_str("ATYPE").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rtype::A), "A");
        assert_eq!(format!("{}", Rtype::from_int(1234)), "TYPE1234");
    }
}
