//! Identifier case normalization, quoting rules, and literal escaping.
//!
//! Splice Machine stores unquoted identifiers in upper case. Callers work in
//! lower case. The two conversions in this module move names between those
//! conventions without touching names that only survive when quoted (mixed
//! case, reserved words, special characters).
//!
//! Catalog procedures take schema and table names as string literals, so
//! every name that reaches query text goes through [`validate_identifier`]
//! and [`escape_literal`] first.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{ReflectError, Result};

/// Maximum identifier length accepted by the catalog.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Words that always need quoting when used as identifiers.
#[rustfmt::skip]
static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abs", "activate", "add", "after", "alias", "all", "allocate", "allow", "alter", "and",
        "any", "are", "array", "as", "asc", "asensitive", "associate", "asutime", "asymmetric",
        "at", "atomic", "attributes", "audit", "authorization", "aux", "auxiliary", "avg", "before",
        "begin", "between", "bigint", "binary", "blob", "boolean", "both", "bufferpool", "by",
        "cache", "call", "called", "capture", "cardinality", "cascaded", "case", "cast", "ccsid",
        "ceil", "ceiling", "char", "char_length", "character", "character_length", "check", "clob",
        "close", "cluster", "coalesce", "collate", "collect", "collection", "collid", "column",
        "comment", "commit", "concat", "condition", "connect", "connection", "constraint",
        "contains", "continue", "convert", "corr", "corresponding", "count", "count_big",
        "covar_pop", "covar_samp", "create", "cross", "cube", "cume_dist", "current",
        "current_date", "current_default_transform_group", "current_lc_ctype", "current_path",
        "current_role", "current_schema", "current_server", "current_time", "current_timestamp",
        "current_timezone", "current_transform_group_for_type", "current_user", "cursor", "cycle",
        "data", "database", "datapartitionname", "datapartitionnum", "date", "day", "days",
        "db2general", "db2genrl", "db2sql", "dbinfo", "dbpartitionname", "dbpartitionnum",
        "deallocate", "dec", "decimal", "declare", "default", "defaults", "definition", "delete",
        "dense_rank", "denserank", "deref", "describe", "descriptor", "deterministic",
        "diagnostics", "disable", "disallow", "disconnect", "distinct", "do", "double", "drop",
        "dssize", "dynamic", "each", "editproc", "element", "else", "elseif", "enable", "encoding",
        "encryption", "end", "end-exec", "ending", "erase", "escape", "every", "except",
        "exception", "excluding", "exclusive", "exec", "execute", "exists", "exit", "exp",
        "explain", "external", "extract", "false", "fenced", "fetch", "fieldproc", "file", "filter",
        "final", "first", "float", "floor", "for", "foreign", "free", "from", "full", "function",
        "fusion", "general", "generated", "get", "global", "go", "goto", "grant", "graphic",
        "group", "grouping", "handler", "hash", "hashed_value", "having", "hint", "hold", "hour",
        "hours", "identity", "if", "immediate", "in", "including", "inclusive", "increment",
        "index", "indicator", "inherit", "inner", "inout", "insensitive", "insert", "int",
        "integer", "integrity", "intersect", "intersection", "interval", "into", "is", "isobid",
        "isolation", "iterate", "jar", "java", "join", "key", "label", "language", "large", "last",
        "lateral", "lc_ctype", "leading", "leave", "left", "like", "linktype", "ln", "local",
        "localdate", "locale", "localtime", "localtimestamp", "locator", "locators", "lock",
        "lockmax", "locksize", "long", "loop", "lower", "maintained", "match", "materialized",
        "max", "maxvalue", "member", "merge", "method", "microsecond", "microseconds", "min",
        "minute", "minutes", "minvalue", "mod", "mode", "modifies", "module", "month", "months",
        "multiset", "national", "natural", "nchar", "nclob", "new", "new_table", "nextval", "no",
        "nocache", "nocycle", "nodename", "nodenumber", "nomaxvalue", "nominvalue", "none",
        "noorder", "normalize", "normalized", "not", "null", "nullif", "nulls", "numeric",
        "numparts", "obid", "octet_length", "of", "old", "old_table", "on", "only", "open",
        "optimization", "optimize", "option", "or", "order", "out", "outer", "over", "overlaps",
        "overlay", "overriding", "package", "padded", "pagesize", "parameter", "part", "partition",
        "partitioned", "partitioning", "partitions", "password", "path", "percent_rank",
        "percentile_cont", "percentile_disc", "piecesize", "plan", "position", "power", "precision",
        "prepare", "prevval", "primary", "priqty", "privileges", "procedure", "program", "psid",
        "query", "queryno", "range", "rank", "read", "reads", "real", "recovery", "recursive",
        "ref", "references", "referencing", "refresh", "regr_avgx", "regr_avgy", "regr_count",
        "regr_intercept", "regr_r2", "regr_slope", "regr_sxx", "regr_sxy", "regr_syy", "release",
        "rename", "repeat", "reset", "resignal", "restart", "restrict", "result",
        "result_set_locator", "return", "returns", "revoke", "right", "rollback", "rollup",
        "routine", "row", "row_number", "rownumber", "rows", "rowset", "rrn", "run", "savepoint",
        "schema", "scope", "scratchpad", "scroll", "search", "second", "seconds", "secqty",
        "security", "select", "sensitive", "sequence", "session", "session_user", "set", "signal",
        "similar", "simple", "size", "smallint", "some", "source", "specific", "specifictype",
        "sql", "sqlexception", "sqlid", "sqlstate", "sqlwarning", "sqrt", "stacked", "standard",
        "start", "starting", "statement", "static", "stay", "stddev_pop", "stddev_samp", "stogroup",
        "stores", "style", "submultiset", "substring", "sum", "summary", "symmetric", "synonym",
        "sysfun", "sysibm", "sysproc", "system", "system_user", "table", "tablesample",
        "tablespace", "then", "time", "timestamp", "timezone_hour", "timezone_minute", "to",
        "trailing", "transaction", "translate", "translation", "treat", "trigger", "trim", "true",
        "type", "uescape", "undo", "union", "unique", "unknown", "unnest", "until", "update",
        "upper", "usage", "user", "using", "validproc", "value", "values", "var_pop", "var_samp",
        "varchar", "variable", "variant", "varying", "vcat", "version", "view", "volatile",
        "volumes", "when", "whenever", "where", "while", "width_bucket", "window", "with", "within",
        "without", "wlm", "write", "xmlelement", "year", "years",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `word` (any case) is a reserved word.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word.to_lowercase().as_str())
}

/// Returns true if `value` can only be used as an identifier when quoted.
///
/// A name needs quotes when it is a reserved word, starts with a digit, `_`
/// or `$`, contains anything outside `[A-Za-z0-9_$]`, or is not already in
/// lower case.
pub fn requires_quotes(value: &str) -> bool {
    let Some(first) = value.chars().next() else {
        return true;
    };

    let lower = value.to_lowercase();
    is_reserved_word(&lower)
        || first.is_ascii_digit()
        || first == '_'
        || first == '$'
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        || lower != value
}

/// Convert a catalog-cased name to the caller's convention.
///
/// An all upper-case name whose lower-case form is quote-free comes back in
/// lower case. Anything else is returned as stored.
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if name.to_uppercase() == name && !requires_quotes(&lower) {
        lower
    } else {
        name.to_string()
    }
}

/// Convert a caller-supplied name to the catalog's storage case.
///
/// An all lower-case, quote-free name is upper-cased. Anything else is
/// passed through unchanged.
pub fn denormalize_name(name: &str) -> String {
    if name.to_lowercase() == name && !requires_quotes(name) {
        name.to_uppercase()
    } else {
        name.to_string()
    }
}

/// [`normalize_name`] over an optional name.
pub fn normalize_opt(name: Option<&str>) -> Option<String> {
    name.map(normalize_name)
}

/// [`denormalize_name`] over an optional name.
pub fn denormalize_opt(name: Option<&str>) -> Option<String> {
    name.map(denormalize_name)
}

/// Validate an identifier before it is placed in query text.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers exceeding maximum length
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ReflectError::InvalidIdentifier(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(ReflectError::InvalidIdentifier(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ReflectError::InvalidIdentifier(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Escape a value for use inside a single-quoted SQL string literal.
/// Doubles single quotes: `O'Brien` -> `O''Brien`
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Validate a name and render it as a single-quoted literal.
pub fn literal(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("'{}'", escape_literal(name)))
}
