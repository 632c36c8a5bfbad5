//! Pack-then-unpack round trips through the wire format.
//!
//! These tests assemble messages, encode them, decode them again, and
//! check which fields survive the trip exactly and which ones are
//! normalized on the way. The NSEC3 scenarios mirror interoperability
//! problems observed in the wild: an empty salt must stay an empty salt
//! (with its length octet on the wire), an opaque salt must come back
//! octet for octet, and the next hashed owner name is canonicalized to
//! upper case when decoding.

use bytes::Bytes;
use core::str::FromStr;
use dns_wire::base::iana::Nsec3HashAlgorithm;
use dns_wire::base::{
    Dname, Message, MessageBuilder, Record, Rtype, StaticCompressor, ToDname,
    Ttl,
};
use dns_wire::rdata::{
    AllRecordData, Nsec3, Nsec3Salt, OwnerHash, RtypeBitmap, A,
};
use dns_wire::base::rdata::UnknownRecordData;
use rstest::rstest;

const OWNER: &str = "ji6neoaepv8b5o6k4ev33abha8ht9fgc.example.";
const HASH_UPPER: &[u8] = b"K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H";

/// Builds NSEC3 record data the way a zone file line would:
/// `NSEC3 1 1 12 <salt> <next owner> A RRSIG`.
fn nsec3(salt: &str, next_owner: &'static [u8]) -> Nsec3<Bytes> {
    let mut types = RtypeBitmap::<Bytes>::builder();
    types.add(Rtype::A);
    types.add(Rtype::RRSIG);
    Nsec3::new(
        Nsec3HashAlgorithm::SHA1,
        1,
        12,
        Nsec3Salt::from_str(salt).unwrap(),
        OwnerHash::from_octets(Bytes::from_static(next_owner)).unwrap(),
        types.finalize(),
    )
}

/// Packs a single NSEC3 record into the answer section of a message.
fn pack_nsec3(data: &Nsec3<Bytes>) -> Vec<u8> {
    let mut msg = MessageBuilder::new_vec().answer();
    msg.push((Dname::<Vec<u8>>::from_str(OWNER).unwrap(), 3600, data))
        .unwrap();
    msg.finish()
}

/// Unpacks the single NSEC3 record from the answer section again.
fn unpack_nsec3(wire: &[u8]) -> Record<Dname<Bytes>, Nsec3<Bytes>> {
    let msg = Message::from_octets_checked(wire).unwrap();
    let record = msg
        .answer()
        .unwrap()
        .limit_to::<Nsec3<Bytes>>()
        .next()
        .expect("one answer")
        .expect("well-formed answer");
    let owner = record.owner().to_bytes();
    Record::new(owner, record.class(), record.ttl(), record.into_data())
}

#[test]
fn nsec3_salt_survives_round_trip() {
    let data = nsec3("aabbccdd", HASH_UPPER);
    let record = unpack_nsec3(&pack_nsec3(&data));

    assert_eq!(record.owner(), &Dname::<Vec<u8>>::from_str(OWNER).unwrap());
    assert_eq!(record.ttl(), Ttl::from_secs(3600));
    assert_eq!(record.data().salt().as_slice(), b"\xaa\xbb\xcc\xdd");
    assert_eq!(record.data(), &data);
}

#[test]
fn nsec3_empty_salt_keeps_length_octet() {
    let data = nsec3("-", HASH_UPPER);
    let wire = pack_nsec3(&data);

    // The record sits right after the header: owner name (42 octets),
    // type, class, TTL, and rdlen (10 octets). The salt length octet is
    // the fifth octet of the record data and must be present and zero.
    let name_len = Dname::<Vec<u8>>::from_str(OWNER).unwrap().len();
    assert_eq!(name_len, 42);
    let rdata_start = 12 + name_len + 10;
    assert_eq!(wire[rdata_start..rdata_start + 4], [1, 1, 0, 12]);
    assert_eq!(wire[rdata_start + 4], 0);

    // An empty salt comes back as an empty value, not as a missing one.
    let record = unpack_nsec3(&wire);
    assert_eq!(record.data().salt().as_slice(), b"");
    assert_eq!(record.data(), &data);
}

#[rstest]
#[case(b"k8udemvp1j2f7eg6jebps17vp3n8i58h")]
#[case(b"K8udemvp1j2f7eg6jebpS17VP3N8I58H")]
#[case(b"K8UDEMVP1J2F7EG6JEBPS17VP3N8I58H")]
fn nsec3_owner_hash_uppercased_on_unpack(
    #[case] next_owner: &'static [u8],
) {
    let record = unpack_nsec3(&pack_nsec3(&nsec3("aabbccdd", next_owner)));
    assert_eq!(record.data().next_owner().as_slice(), HASH_UPPER);
}

#[test]
fn message_round_trip_with_compression() {
    let name = Dname::<Vec<u8>>::from_str("example.com").unwrap();
    let www = Dname::<Vec<u8>>::from_str("www.example.com").unwrap();

    let mut msg = MessageBuilder::from_target(StaticCompressor::new(
        Vec::new(),
    ))
    .unwrap();
    msg.header_mut().set_id(0x1234);
    msg.header_mut().set_qr(true);
    msg.header_mut().set_aa(true);
    let mut msg = msg.question();
    msg.push((&name, Rtype::A)).unwrap();
    let mut msg = msg.answer();
    msg.push((&www, 86400, A::from_octets(192, 0, 2, 1))).unwrap();
    let mut msg = msg.authority();
    msg.push((&name, 900, nsec3("aabbccdd", HASH_UPPER))).unwrap();
    let mut msg = msg.additional();
    msg.push((
        &name,
        0,
        UnknownRecordData::from_octets(
            Rtype::from_int(4711),
            Bytes::from_static(b"\x01\x02\x03"),
        )
        .unwrap(),
    ))
    .unwrap();
    let wire = msg.finish().into_target();

    let msg = Message::from_octets_checked(wire.as_slice()).unwrap();
    assert_eq!(msg.header().id(), 0x1234);
    assert!(msg.header().qr());
    assert!(msg.header().aa());
    assert_eq!(msg.header_counts().qdcount(), 1);
    assert_eq!(msg.header_counts().ancount(), 1);
    assert_eq!(msg.header_counts().nscount(), 1);
    assert_eq!(msg.header_counts().arcount(), 1);

    // The question and the compressed answer name expand correctly.
    let question = msg.first_question().unwrap();
    assert_eq!(question.qname(), &name);
    let answer = msg
        .answer()
        .unwrap()
        .limit_to::<A>()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(answer.owner(), &www);
    assert_eq!(answer.ttl(), Ttl::DAY);
    assert_eq!(answer.data(), &A::from_octets(192, 0, 2, 1));

    // The NSEC3 in the authority section keeps its bitmap and salt.
    let nsec3_rr = msg
        .authority()
        .unwrap()
        .limit_to::<Nsec3<Bytes>>()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(nsec3_rr.ttl(), Ttl::from_secs(900));
    assert!(nsec3_rr.data().types().contains(Rtype::RRSIG));
    assert_eq!(nsec3_rr.data().salt().as_slice(), b"\xaa\xbb\xcc\xdd");

    // The unknown record type comes back with its raw data intact.
    let unknown = msg
        .additional()
        .unwrap()
        .limit_to::<AllRecordData<Bytes>>()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(unknown.rtype(), Rtype::from_int(4711));
    match unknown.data() {
        AllRecordData::Unknown(data) => {
            assert_eq!(data.data().as_ref(), b"\x01\x02\x03")
        }
        _ => panic!("expected unknown record data"),
    }
}

#[test]
fn truncated_message_never_unpacks() {
    let wire = pack_nsec3(&nsec3("aabbccdd", HASH_UPPER));
    assert!(Message::from_octets_checked(wire.as_slice()).is_ok());

    // No prefix of the message may decode successfully, no matter where
    // it is cut off.
    for len in 0..wire.len() {
        assert!(
            Message::from_octets_checked(&wire[..len]).is_err(),
            "truncation to {} octets unexpectedly decoded",
            len
        );
    }
}

#[test]
fn forward_pointer_fails() {
    // A message claiming one question whose name points at itself.
    let mut wire = vec![0u8; 12];
    wire[5] = 1; // qdcount
    wire.extend_from_slice(b"\xc0\x0c\x00\x01\x00\x01");
    assert!(Message::from_octets_checked(wire.as_slice()).is_err());
}

#[test]
fn unknown_rdata_round_trips_verbatim() {
    // 4711 stands in for any record type this crate has no codec for.
    let data = UnknownRecordData::from_octets(
        Rtype::from_int(4711),
        Bytes::from_static(b"\xfe\xed\xfa\xce"),
    )
    .unwrap();
    let mut msg = MessageBuilder::new_vec().answer();
    msg.push((
        Dname::<Vec<u8>>::from_str("example.com").unwrap(),
        60,
        &data,
    ))
    .unwrap();
    let wire = msg.finish();

    let msg = Message::from_octets_checked(wire.as_slice()).unwrap();
    let parsed = msg
        .answer()
        .unwrap()
        .limit_to::<UnknownRecordData<Bytes>>()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(parsed.data(), &data);
}
