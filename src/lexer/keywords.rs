//! Keyword recognition and classification.
//!
//! Keywords are case-insensitive. Each keyword is either *reserved* (never a
//! valid bare identifier) or *non-reserved* (a keyword inside the construct
//! that defines it, but a plain identifier everywhere else).

use std::fmt;

macro_rules! keywords {
    ($($variant:ident => $text:literal, $class:ident;)*) => {
        /// A SQL keyword.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Returns the canonical upper-case spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            /// Returns true if this keyword can never be used as a bare identifier.
            pub fn is_reserved(self) -> bool {
                match self {
                    $(Keyword::$variant => keywords!(@reserved $class),)*
                }
            }
        }

        /// Looks up a keyword by name (case-insensitive).
        pub fn lookup_keyword(word: &str) -> Option<Keyword> {
            match word.to_ascii_uppercase().as_str() {
                $($text => Some(Keyword::$variant),)*
                _ => None,
            }
        }
    };
    (@reserved reserved) => { true };
    (@reserved nonreserved) => { false };
}

keywords! {
    Add => "ADD", nonreserved;
    Admin => "ADMIN", nonreserved;
    All => "ALL", nonreserved;
    Alter => "ALTER", reserved;
    Analyze => "ANALYZE", nonreserved;
    And => "AND", reserved;
    Any => "ANY", nonreserved;
    Array => "ARRAY", nonreserved;
    As => "AS", reserved;
    Asc => "ASC", nonreserved;
    At => "AT", nonreserved;
    Before => "BEFORE", nonreserved;
    Bernoulli => "BERNOULLI", nonreserved;
    Between => "BETWEEN", reserved;
    By => "BY", reserved;
    Call => "CALL", nonreserved;
    Called => "CALLED", nonreserved;
    Cascade => "CASCADE", nonreserved;
    Case => "CASE", reserved;
    Cast => "CAST", reserved;
    Catalogs => "CATALOGS", nonreserved;
    Column => "COLUMN", nonreserved;
    Columns => "COLUMNS", nonreserved;
    Comment => "COMMENT", nonreserved;
    Commit => "COMMIT", nonreserved;
    Committed => "COMMITTED", nonreserved;
    Constraint => "CONSTRAINT", reserved;
    Copartition => "COPARTITION", nonreserved;
    Create => "CREATE", reserved;
    Cross => "CROSS", reserved;
    Cube => "CUBE", reserved;
    Current => "CURRENT", nonreserved;
    CurrentDate => "CURRENT_DATE", reserved;
    CurrentRole => "CURRENT_ROLE", nonreserved;
    CurrentTime => "CURRENT_TIME", reserved;
    CurrentTimestamp => "CURRENT_TIMESTAMP", reserved;
    CurrentUser => "CURRENT_USER", reserved;
    Data => "DATA", nonreserved;
    Date => "DATE", nonreserved;
    Day => "DAY", nonreserved;
    Deallocate => "DEALLOCATE", reserved;
    Definer => "DEFINER", nonreserved;
    Delete => "DELETE", reserved;
    Desc => "DESC", nonreserved;
    Describe => "DESCRIBE", reserved;
    Deterministic => "DETERMINISTIC", nonreserved;
    Disabled => "DISABLED", nonreserved;
    Distinct => "DISTINCT", reserved;
    Distributed => "DISTRIBUTED", nonreserved;
    Drop => "DROP", reserved;
    Else => "ELSE", reserved;
    Enabled => "ENABLED", nonreserved;
    End => "END", reserved;
    Enforced => "ENFORCED", nonreserved;
    Escape => "ESCAPE", reserved;
    Except => "EXCEPT", reserved;
    Excluding => "EXCLUDING", nonreserved;
    Execute => "EXECUTE", reserved;
    Exists => "EXISTS", reserved;
    Explain => "EXPLAIN", nonreserved;
    External => "EXTERNAL", nonreserved;
    Extract => "EXTRACT", reserved;
    False => "FALSE", reserved;
    Fetch => "FETCH", nonreserved;
    Filter => "FILTER", nonreserved;
    First => "FIRST", nonreserved;
    Following => "FOLLOWING", nonreserved;
    For => "FOR", reserved;
    Format => "FORMAT", nonreserved;
    From => "FROM", reserved;
    Full => "FULL", reserved;
    Function => "FUNCTION", nonreserved;
    Functions => "FUNCTIONS", nonreserved;
    Grant => "GRANT", nonreserved;
    Granted => "GRANTED", nonreserved;
    Grants => "GRANTS", nonreserved;
    Graphviz => "GRAPHVIZ", nonreserved;
    Group => "GROUP", reserved;
    Grouping => "GROUPING", reserved;
    Groups => "GROUPS", nonreserved;
    Having => "HAVING", reserved;
    Hour => "HOUR", nonreserved;
    If => "IF", nonreserved;
    Ignore => "IGNORE", nonreserved;
    In => "IN", reserved;
    Including => "INCLUDING", nonreserved;
    Inner => "INNER", reserved;
    Input => "INPUT", nonreserved;
    Insert => "INSERT", reserved;
    Intersect => "INTERSECT", reserved;
    Interval => "INTERVAL", nonreserved;
    Into => "INTO", reserved;
    Invoker => "INVOKER", nonreserved;
    Io => "IO", nonreserved;
    Is => "IS", reserved;
    Isolation => "ISOLATION", nonreserved;
    Join => "JOIN", reserved;
    Json => "JSON", nonreserved;
    Key => "KEY", nonreserved;
    Language => "LANGUAGE", nonreserved;
    Last => "LAST", nonreserved;
    Lateral => "LATERAL", nonreserved;
    Left => "LEFT", reserved;
    Level => "LEVEL", nonreserved;
    Like => "LIKE", reserved;
    Limit => "LIMIT", nonreserved;
    Localtime => "LOCALTIME", reserved;
    Localtimestamp => "LOCALTIMESTAMP", reserved;
    Logical => "LOGICAL", nonreserved;
    Map => "MAP", nonreserved;
    Materialized => "MATERIALIZED", nonreserved;
    Minute => "MINUTE", nonreserved;
    Month => "MONTH", nonreserved;
    Name => "NAME", nonreserved;
    Natural => "NATURAL", reserved;
    Nfc => "NFC", nonreserved;
    Nfd => "NFD", nonreserved;
    Nfkc => "NFKC", nonreserved;
    Nfkd => "NFKD", nonreserved;
    No => "NO", nonreserved;
    None => "NONE", nonreserved;
    Normalize => "NORMALIZE", reserved;
    Not => "NOT", reserved;
    Null => "NULL", reserved;
    Nullif => "NULLIF", nonreserved;
    Nulls => "NULLS", nonreserved;
    Of => "OF", nonreserved;
    Offset => "OFFSET", nonreserved;
    On => "ON", reserved;
    Only => "ONLY", nonreserved;
    Option => "OPTION", nonreserved;
    Or => "OR", reserved;
    Order => "ORDER", reserved;
    Ordinality => "ORDINALITY", nonreserved;
    Outer => "OUTER", reserved;
    Output => "OUTPUT", nonreserved;
    Over => "OVER", nonreserved;
    Partition => "PARTITION", nonreserved;
    Partitions => "PARTITIONS", nonreserved;
    Position => "POSITION", nonreserved;
    Preceding => "PRECEDING", nonreserved;
    Prepare => "PREPARE", reserved;
    Primary => "PRIMARY", nonreserved;
    Privileges => "PRIVILEGES", nonreserved;
    Properties => "PROPERTIES", nonreserved;
    Range => "RANGE", nonreserved;
    Read => "READ", nonreserved;
    Recursive => "RECURSIVE", reserved;
    Refresh => "REFRESH", nonreserved;
    Rely => "RELY", nonreserved;
    Rename => "RENAME", nonreserved;
    Repeatable => "REPEATABLE", nonreserved;
    Replace => "REPLACE", nonreserved;
    Reset => "RESET", nonreserved;
    Respect => "RESPECT", nonreserved;
    Restrict => "RESTRICT", nonreserved;
    Return => "RETURN", nonreserved;
    Returns => "RETURNS", nonreserved;
    Revoke => "REVOKE", nonreserved;
    Right => "RIGHT", reserved;
    Role => "ROLE", nonreserved;
    Roles => "ROLES", nonreserved;
    Rollback => "ROLLBACK", nonreserved;
    Rollup => "ROLLUP", reserved;
    Row => "ROW", nonreserved;
    Rows => "ROWS", nonreserved;
    Schema => "SCHEMA", nonreserved;
    Schemas => "SCHEMAS", nonreserved;
    Second => "SECOND", nonreserved;
    Security => "SECURITY", nonreserved;
    Select => "SELECT", reserved;
    Serializable => "SERIALIZABLE", nonreserved;
    Session => "SESSION", nonreserved;
    Set => "SET", nonreserved;
    Sets => "SETS", nonreserved;
    Show => "SHOW", nonreserved;
    Some => "SOME", nonreserved;
    Sql => "SQL", nonreserved;
    Start => "START", nonreserved;
    Stats => "STATS", nonreserved;
    Substring => "SUBSTRING", nonreserved;
    System => "SYSTEM", nonreserved;
    SystemTime => "SYSTEM_TIME", nonreserved;
    SystemVersion => "SYSTEM_VERSION", nonreserved;
    Table => "TABLE", reserved;
    Tables => "TABLES", nonreserved;
    Tablesample => "TABLESAMPLE", nonreserved;
    Temporary => "TEMPORARY", nonreserved;
    Text => "TEXT", nonreserved;
    Then => "THEN", reserved;
    Time => "TIME", nonreserved;
    Timestamp => "TIMESTAMP", nonreserved;
    To => "TO", nonreserved;
    Transaction => "TRANSACTION", nonreserved;
    True => "TRUE", reserved;
    Truncate => "TRUNCATE", nonreserved;
    TryCast => "TRY_CAST", nonreserved;
    Type => "TYPE", nonreserved;
    Uescape => "UESCAPE", reserved;
    Unbounded => "UNBOUNDED", nonreserved;
    Uncommitted => "UNCOMMITTED", nonreserved;
    Union => "UNION", reserved;
    Unique => "UNIQUE", nonreserved;
    Unnest => "UNNEST", reserved;
    Update => "UPDATE", nonreserved;
    Use => "USE", nonreserved;
    User => "USER", nonreserved;
    Using => "USING", reserved;
    Validate => "VALIDATE", nonreserved;
    Values => "VALUES", reserved;
    Verbose => "VERBOSE", nonreserved;
    Version => "VERSION", nonreserved;
    View => "VIEW", nonreserved;
    When => "WHEN", reserved;
    Where => "WHERE", reserved;
    With => "WITH", reserved;
    Work => "WORK", nonreserved;
    Write => "WRITE", nonreserved;
    Year => "YEAR", nonreserved;
    Zone => "ZONE", nonreserved;
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `word` is a reserved keyword (case-insensitive).
pub fn is_reserved_word(word: &str) -> bool {
    lookup_keyword(word).is_some_and(Keyword::is_reserved)
}

/// Iterates over the non-reserved keywords.
pub fn non_reserved_keywords() -> impl Iterator<Item = Keyword> {
    Keyword::ALL.iter().copied().filter(|kw| !kw.is_reserved())
}
