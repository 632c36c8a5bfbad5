//! DNS response codes.

//------------ Rcode ---------------------------------------------------------

int_enum! {
    /// DNS response codes.
    ///
    /// The response code of a message indicates what happened when the
    /// server processed the query. Only the basic four-bit codes that fit
    /// into the message header are represented here; extended codes need
    /// EDNS which is outside the scope of this crate.
    =>
    Rcode, u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// The server was unable to interpret the query.
    (FORMERR => 1, "FORMERR")

    /// The server encountered an internal failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// The queried domain name does not exist.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// The server does not support the requested kind of query.
    (NOTIMP => 4, "NOTIMP")

    /// The server refused to perform the operation.
    (REFUSED => 5, "REFUSED")

    /// A name exists when it should not.
    (YXDOMAIN => 6, "YXDOMAIN")

    /// An RR set exists when it should not.
    (YXRRSET => 7, "YXRRSET")

    /// An RR set that should exist does not.
    (NXRRSET => 8, "NXRRSET")

    /// The server is not authoritative for the zone.
    (NOTAUTH => 9, "NOTAUTH")

    /// A name is not within the zone named in the request.
    (NOTZONE => 10, "NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown response code");
