//! The reserved-word table and the session-configurable non-keyword set.
//!
//! The table is fixed at build time: `Keyword` discriminants are contiguous
//! between [`FIRST_KEYWORD`] and [`LAST_KEYWORD`] and the parallel spelling
//! table is sorted, so lookup is a single binary search on the upper-cased
//! spelling.

use core::fmt;

macro_rules! kw_text {
    ($ident:ident) => {
        stringify!($ident)
    };
    ($ident:ident = $text:expr) => {
        $text
    };
}

macro_rules! define_keywords {
    (
        $( $keyword:ident $(= $text:expr)? ),* $(,)?
        ; reserved: $( $reserved:ident ),* $(,)?
    ) => {
        /// A word with grammatical meaning.
        ///
        /// Not every keyword is reserved; non-reserved keywords may still be
        /// used as identifiers. See [`Keyword::is_reserved`].
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Keyword {
            $($keyword),*
        }

        /// All keywords, in spelling order.
        pub const ALL_KEYWORDS: &[Keyword] = &[$(Keyword::$keyword),*];

        /// All keyword spellings, sorted (required for binary search).
        pub const ALL_KEYWORD_STRINGS: &[&str] = &[$(kw_text!($keyword $(= $text)?)),*];

        const RESERVED_KEYWORDS: &[Keyword] = &[$(Keyword::$reserved),*];
    };
}

define_keywords! {
    ACTION,
    ADD,
    ADMIN,
    AFTER,
    AGGREGATE,
    ALIAS,
    ALL,
    ALTER,
    ALWAYS,
    ANALYZE,
    AND,
    ANY,
    ARRAY,
    AS,
    ASC,
    ASYMMETRIC,
    AT,
    AUTHORIZATION,
    AUTO_INCREMENT,
    BEFORE,
    BEGIN,
    BETWEEN,
    BIGINT,
    BINARY,
    BLOB,
    BOOLEAN,
    BOTH,
    BY,
    BYTE,
    CACHE,
    CALL,
    CASCADE,
    CASE,
    CAST,
    CHANGE,
    CHAR,
    CHARACTER,
    CHARACTERS,
    CHARSET,
    CHECK,
    CHECKPOINT,
    CLOB,
    COLLATE,
    COLUMN,
    COLUMNS,
    COMMENT,
    COMMIT,
    COMPACT,
    CONFLICT,
    CONSTANT,
    CONSTRAINT,
    CREATE,
    CROSS,
    CURRENT,
    CURRENT_CATALOG,
    CURRENT_DATE,
    CURRENT_ROLE,
    CURRENT_SCHEMA,
    CURRENT_TIME,
    CURRENT_TIMESTAMP,
    CURRENT_USER,
    CYCLE,
    DATA,
    DATABASE,
    DATABASES,
    DATE,
    DAY,
    DEALLOCATE,
    DEC,
    DECFLOAT,
    DECIMAL,
    DEFAULT,
    DEFRAG,
    DELETE,
    DESC,
    DISABLE,
    DISTINCT,
    DO,
    DOMAIN,
    DOUBLE,
    DROP,
    DUPLICATE,
    EACH,
    ELSE,
    ENABLE,
    END,
    ENGINE,
    ENUM,
    ESCAPE,
    EXCEPT,
    EXCLUDE,
    EXEC,
    EXECUTE,
    EXISTS,
    EXPLAIN,
    FALSE,
    FETCH,
    FILTER,
    FINAL,
    FIRST,
    FOLLOWING,
    FOR,
    FORCE,
    FOREIGN,
    FORMAT,
    FROM,
    FULL,
    FUNCTION,
    GENERATED,
    GEOMETRY,
    GLOBAL,
    GRANT,
    GROUP,
    GROUPS,
    HASH,
    HAVING,
    HELP,
    HOUR,
    IDENTITY,
    IF,
    IGNORE,
    ILIKE,
    IMMEDIATELY,
    IN,
    INCLUDE,
    INCREMENT,
    INDEX,
    INNER,
    INSERT,
    INSTEAD,
    INT,
    INTEGER,
    INTERSECT,
    INTERSECTS,
    INTERVAL,
    INTO,
    IS,
    JOIN,
    JSON,
    KEY,
    LARGE,
    LAST,
    LEADING,
    LEFT,
    LIKE,
    LIMIT,
    LINKED,
    LOCAL,
    LOCALTIME,
    LOCALTIMESTAMP,
    LOGSIZE,
    LONG,
    MATCHED,
    MAXVALUE,
    MERGE,
    MINUS,
    MINUTE,
    MINVALUE,
    MODIFY,
    MONTH,
    NAMES,
    NATIONAL,
    NATURAL,
    NEW,
    NEXT,
    NO,
    NOT,
    NOTHING,
    NOVALIDATE,
    NULL,
    NULLS,
    NUMBER,
    NUMERIC,
    OBJECT,
    OCTETS,
    OF,
    OFFSET,
    OLD,
    ON,
    ONLY,
    OPTION,
    OR,
    ORDER,
    OTHERS,
    OUTER,
    OVER,
    OVERRIDING,
    PARTITION,
    PASSWORD,
    PERCENT,
    PLAN,
    PRECEDING,
    PRECISION,
    PREPARE,
    PRIMARY,
    PRIVILEGES,
    QUALIFY,
    RANGE,
    RAW,
    READ,
    REAL,
    RECURSIVE,
    REFERENCES,
    REGEXP,
    RELEASE,
    RENAME,
    REPLACE,
    RESTART,
    RESTRICT,
    REVOKE,
    RIGHT,
    ROLE,
    ROLLBACK,
    ROW,
    ROWNUM,
    ROWS,
    RUNSCRIPT,
    SAVEPOINT,
    SCHEMA,
    SCRIPT,
    SECOND,
    SELECT,
    SEQUENCE,
    SESSION,
    SESSION_USER,
    SET,
    SHOW,
    SHUTDOWN,
    SMALLINT,
    SOME,
    SPATIAL,
    START,
    STATEMENT,
    SYMMETRIC,
    SYNC,
    SYNONYM,
    SYSTEM,
    SYSTEM_USER,
    TABLE,
    TABLES,
    TEMP,
    TEMPORARY,
    THEN,
    TIES,
    TIME,
    TIMESTAMP,
    TINYINT,
    TO,
    TOP,
    TRAILING,
    TRANSACTION,
    TRIGGER,
    TRUE,
    TRUNCATE,
    TYPE,
    UESCAPE,
    UNBOUNDED,
    UNION,
    UNIQUE,
    UNKNOWN,
    UNSIGNED,
    UPDATE,
    USE,
    USER,
    USING,
    UUID,
    VALIDATE,
    VALUE,
    VALUES,
    VARBINARY,
    VARCHAR,
    VARCHAR_IGNORECASE,
    VARYING,
    VIEW,
    WHEN,
    WHERE,
    WINDOW,
    WITH,
    WITHIN,
    WITHOUT,
    WORK,
    YEAR,
    ZONE,
    ;
    reserved:
    ALL,
    AND,
    ANY,
    ARRAY,
    AS,
    ASYMMETRIC,
    AUTHORIZATION,
    BETWEEN,
    BOTH,
    CASE,
    CAST,
    CHECK,
    CONSTRAINT,
    CREATE,
    CROSS,
    CURRENT_CATALOG,
    CURRENT_DATE,
    CURRENT_ROLE,
    CURRENT_SCHEMA,
    CURRENT_TIME,
    CURRENT_TIMESTAMP,
    CURRENT_USER,
    DAY,
    DEFAULT,
    DISTINCT,
    ELSE,
    END,
    EXCEPT,
    EXISTS,
    FALSE,
    FETCH,
    FILTER,
    FOR,
    FOREIGN,
    FROM,
    FULL,
    GROUP,
    GROUPS,
    HAVING,
    HOUR,
    IF,
    ILIKE,
    IN,
    INNER,
    INTERSECT,
    INTERSECTS,
    INTERVAL,
    IS,
    JOIN,
    KEY,
    LEADING,
    LEFT,
    LIKE,
    LIMIT,
    LOCALTIME,
    LOCALTIMESTAMP,
    MINUS,
    MINUTE,
    MONTH,
    NATURAL,
    NOT,
    NULL,
    OFFSET,
    ON,
    OR,
    ORDER,
    OVER,
    PARTITION,
    PRIMARY,
    QUALIFY,
    RANGE,
    REGEXP,
    RIGHT,
    ROW,
    ROWNUM,
    ROWS,
    SECOND,
    SELECT,
    SESSION_USER,
    SET,
    SOME,
    SYMMETRIC,
    SYSTEM_USER,
    TABLE,
    THEN,
    TO,
    TOP,
    TRAILING,
    TRUE,
    UESCAPE,
    UNION,
    UNIQUE,
    UNKNOWN,
    USER,
    USING,
    VALUE,
    VALUES,
    WHEN,
    WHERE,
    WINDOW,
    WITH,
    YEAR,
}

/// The first keyword in the table.
pub const FIRST_KEYWORD: Keyword = ALL_KEYWORDS[0];
/// The last keyword in the table.
pub const LAST_KEYWORD: Keyword = ALL_KEYWORDS[ALL_KEYWORDS.len() - 1];

impl Keyword {
    /// Looks up a keyword by its already upper-cased spelling.
    pub fn lookup(upper: &str) -> Option<Keyword> {
        ALL_KEYWORD_STRINGS
            .binary_search(&upper)
            .ok()
            .map(|index| ALL_KEYWORDS[index])
    }

    /// Returns the canonical spelling.
    pub fn as_str(self) -> &'static str {
        ALL_KEYWORD_STRINGS[self as usize]
    }

    /// Whether the keyword is reserved and thus unusable as a plain identifier.
    pub fn is_reserved(self) -> bool {
        RESERVED_KEYWORDS.binary_search(&self).is_ok()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const KEYWORD_SET_WORDS: usize = (ALL_KEYWORDS.len() + 63) / 64;

/// A bitset over the contiguous keyword ids.
///
/// A session supplies one of these to downgrade reserved words to ordinary
/// identifiers for dialect compatibility (`SET NON_KEYWORDS`).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct KeywordSet {
    bits: [u64; KEYWORD_SET_WORDS],
}

impl KeywordSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self {
            bits: [0; KEYWORD_SET_WORDS],
        }
    }

    /// Builds a set from a keyword slice.
    pub fn from_keywords(keywords: &[Keyword]) -> Self {
        let mut set = Self::empty();
        for &keyword in keywords {
            set.insert(keyword);
        }
        set
    }

    /// Inserts a keyword.
    pub fn insert(&mut self, keyword: Keyword) {
        let id = keyword as usize;
        self.bits[id / 64] |= 1 << (id % 64);
    }

    /// Removes a keyword.
    pub fn remove(&mut self, keyword: Keyword) {
        let id = keyword as usize;
        self.bits[id / 64] &= !(1 << (id % 64));
    }

    /// Membership test.
    pub fn contains(&self, keyword: Keyword) -> bool {
        let id = keyword as usize;
        self.bits[id / 64] & (1 << (id % 64)) != 0
    }

    /// Whether no keyword is in the set.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_strings_are_sorted() {
        for window in ALL_KEYWORD_STRINGS.windows(2) {
            assert!(window[0] < window[1], "{:?} out of order", window);
        }
        for window in RESERVED_KEYWORDS.windows(2) {
            assert!(window[0] < window[1], "{:?} out of order", window);
        }
    }

    #[test]
    fn lookup_round_trips() {
        for &keyword in ALL_KEYWORDS {
            assert_eq!(Keyword::lookup(keyword.as_str()), Some(keyword));
        }
        assert_eq!(Keyword::lookup("NOT_A_KEYWORD"), None);
        assert_eq!(Keyword::lookup("select"), None); // lookup expects upper case
    }

    #[test]
    fn reserved_subset() {
        assert!(Keyword::SELECT.is_reserved());
        assert!(Keyword::WHERE.is_reserved());
        assert!(!Keyword::MERGE.is_reserved());
        assert!(!Keyword::CACHE.is_reserved());
    }

    #[test]
    fn keyword_set() {
        let mut set = KeywordSet::empty();
        assert!(set.is_empty());
        set.insert(Keyword::LIMIT);
        set.insert(Keyword::TOP);
        assert!(set.contains(Keyword::LIMIT));
        assert!(set.contains(Keyword::TOP));
        assert!(!set.contains(Keyword::SELECT));
        set.remove(Keyword::LIMIT);
        assert!(!set.contains(Keyword::LIMIT));
    }
}
