//! Record classes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS class values.
    ///
    /// The class originally describes which sort of network the record's
    /// data is for. In practice, only the IN class is relevant; the NONE
    /// and ANY values are used in UPDATE requests and queries.
    =>
    Class, u16;

    /// The Internet.
    (IN => 1, "IN")

    /// The Chaosnet.
    (CH => 3, "CH")

    /// Hesiod.
    (HS => 4, "HS")

    /// Query and UPDATE only: no class.
    (NONE => 254, "NONE")

    /// Query only: any class.
    (ANY => 255, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", b"CLASS", u16, "unknown class");
