//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query a message contains. It lives
    /// in the second octet of a message header.
    =>
    Opcode, u8;

    /// A standard query.
    (QUERY => 0, "QUERY")

    /// An inverse query, long since obsolete.
    (IQUERY => 1, "IQUERY")

    /// A server status request.
    (STATUS => 2, "STATUS")

    /// A zone change notification.
    (NOTIFY => 4, "NOTIFY")

    /// A dynamic update request.
    (UPDATE => 5, "UPDATE")
}

int_enum_str_with_decimal!(Opcode, u8, "unknown opcode");
