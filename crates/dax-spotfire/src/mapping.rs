//! Spotfire → DAX mapping tables

use dax_core::{DialectMappings, MappingTable, NullRules};
use std::sync::OnceLock;

static DATA_TYPES: &[(&str, &str)] = &[
    ("string", "TEXT"),
    ("integer", "INTEGER"),
    ("long", "INTEGER"),
    ("real", "DOUBLE"),
    ("single", "DOUBLE"),
    ("double", "DOUBLE"),
    ("decimal", "DECIMAL"),
    ("datetime", "DATETIME"),
    ("date", "DATE"),
    ("time", "TIME"),
    ("timespan", "TIME"),
    ("boolean", "BOOLEAN"),
    ("currency", "CURRENCY"),
];

static FUNCTIONS: &[(&str, &str)] = &[
    ("sum", "SUM"),
    ("count", "COUNT"),
    ("countdistinct", "DISTINCTCOUNT"),
    ("avg", "AVERAGE"),
    ("min", "MIN"),
    ("max", "MAX"),
    ("median", "MEDIAN"),
    ("stdev", "STDEV.S"),
    ("stdevp", "STDEV.P"),
    ("var", "VAR.S"),
    ("varp", "VAR.P"),
    ("first", "FIRSTNONBLANK"),
    ("last", "LASTNONBLANK"),
    ("concatenate", "CONCATENATE"),
    ("len", "LEN"),
    ("left", "LEFT"),
    ("right", "RIGHT"),
    ("mid", "MID"),
    ("find", "FIND"),
    ("substitute", "SUBSTITUTE"),
    ("upper", "UPPER"),
    ("lower", "LOWER"),
    ("trim", "TRIM"),
    ("if", "IF"),
    ("case", "SWITCH"),
    ("when", "SWITCH"),
    ("year", "YEAR"),
    ("month", "MONTH"),
    ("day", "DAY"),
    ("hour", "HOUR"),
    ("minute", "MINUTE"),
    ("second", "SECOND"),
    ("dateadd", "DATEADD"),
    ("datediff", "DATEDIFF"),
    ("now", "NOW"),
    ("today", "TODAY"),
    ("weekday", "WEEKDAY"),
    ("weeknum", "WEEKNUM"),
    ("quarter", "QUARTER"),
    ("abs", "ABS"),
    ("ceiling", "CEILING"),
    ("floor", "FLOOR"),
    ("round", "ROUND"),
    ("mod", "MOD"),
    ("power", "POWER"),
    ("sqrt", "SQRT"),
    ("exp", "EXP"),
    ("log", "LOG"),
    ("log10", "LOG10"),
    ("sin", "SIN"),
    ("cos", "COS"),
    ("tan", "TAN"),
    ("asin", "ASIN"),
    ("acos", "ACOS"),
    ("atan", "ATAN"),
    ("pi", "PI"),
    ("rank", "RANKX"),
    ("denserank", "RANKX"),
    ("rowid", "RANKX"),
    ("rownumber", "RANKX"),
    ("percentile", "PERCENTILE.EXC"),
    ("ntile", "RANKX"),
];

/// NULL idioms in application order
static NULL_RULES: &[(&str, &str)] = &[
    (r"\bIsNull\s*\(\s*([^)]+?)\s*\)", "ISBLANK(${1})"),
    (r"\bIsEmpty\s*\(\s*([^)]+?)\s*\)", "ISBLANK(${1})"),
    (
        r"\bIfNull\s*\(\s*([^,]+?)\s*,\s*([^)]+?)\s*\)",
        "IF(ISBLANK(${1}), ${2}, ${1})",
    ),
    (
        r"\bNullIf\s*\(\s*([^,]+?)\s*,\s*([^)]+?)\s*\)",
        "IF(${1} = ${2}, BLANK(), ${1})",
    ),
    (r"\bCoalesce\s*\(", "COALESCE("),
];

/// Shared Spotfire mapping tables
pub fn spotfire_mappings() -> &'static DialectMappings {
    static MAPPINGS: OnceLock<DialectMappings> = OnceLock::new();
    MAPPINGS.get_or_init(|| DialectMappings {
        data_types: MappingTable::new("data_types", DATA_TYPES),
        functions: MappingTable::new("functions", FUNCTIONS),
        null_rules: NullRules::new(NULL_RULES).expect("valid null rules"),
    })
}

/// Special form for conversion functions: `Integer([x])` becomes
/// `CONVERT(x, INTEGER)` through the data-type table
pub fn conversion_form(
    mappings: &DialectMappings,
) -> impl Fn(&str, &[&str]) -> Option<String> + Send + Sync + '_ {
    move |name: &str, args: &[&str]| match args {
        [argument] if !argument.is_empty() => mappings
            .data_types
            .lookup(name)
            .map(|ty| format!("CONVERT({argument}, {ty})")),
        _ => None,
    }
}
