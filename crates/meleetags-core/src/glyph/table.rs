/// Glyph code to character, sorted by code.
///
/// Codes are the big-endian values the game stores in each nametag glyph
/// block. Lowercase letters do not exist in the nametag entry screen.
pub static GLYPH_TABLE: [(u16, &str); 47] = [
    (0x2000, "0"),
    (0x2001, "1"),
    (0x2002, "2"),
    (0x2003, "3"),
    (0x2004, "4"),
    (0x2005, "5"),
    (0x2006, "6"),
    (0x2007, "7"),
    (0x2008, "8"),
    (0x2009, "9"),
    (0x200A, "A"),
    (0x200B, "B"),
    (0x200C, "C"),
    (0x200D, "D"),
    (0x200E, "E"),
    (0x200F, "F"),
    (0x2010, "G"),
    (0x2011, "H"),
    (0x2012, "I"),
    (0x2013, "J"),
    (0x2014, "K"),
    (0x2015, "L"),
    (0x2016, "M"),
    (0x2017, "N"),
    (0x2018, "O"),
    (0x2019, "P"),
    (0x201A, "Q"),
    (0x201B, "R"),
    (0x201C, "S"),
    (0x201D, "T"),
    (0x201E, "U"),
    (0x201F, "V"),
    (0x2020, "W"),
    (0x2021, "X"),
    (0x2022, "Y"),
    (0x2023, "Z"),
    (0x20E3, " "),
    (0x20E7, "."),
    (0x20EB, "?"),
    (0x20EC, "!"),
    (0x20FB, "+"),
    (0x20FC, "-"),
    (0x20FE, "="),
    (0x2102, "$"),
    (0x2103, "%"),
    (0x2105, "&"),
    (0x2107, "@"),
];
