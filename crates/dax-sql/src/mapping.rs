//! SQL → DAX mapping tables

use dax_core::{DialectMappings, MappingTable, NullRules};
use std::sync::OnceLock;

static DATA_TYPES: &[(&str, &str)] = &[
    ("varchar", "TEXT"),
    ("nvarchar", "TEXT"),
    ("char", "TEXT"),
    ("nchar", "TEXT"),
    ("text", "TEXT"),
    ("ntext", "TEXT"),
    ("int", "INTEGER"),
    ("integer", "INTEGER"),
    ("bigint", "INTEGER"),
    ("smallint", "INTEGER"),
    ("tinyint", "INTEGER"),
    ("decimal", "DECIMAL"),
    ("numeric", "DECIMAL"),
    ("float", "DOUBLE"),
    ("real", "DOUBLE"),
    ("money", "CURRENCY"),
    ("smallmoney", "CURRENCY"),
    ("date", "DATE"),
    ("datetime", "DATETIME"),
    ("datetime2", "DATETIME"),
    ("smalldatetime", "DATETIME"),
    ("timestamp", "DATETIME"),
    ("time", "TIME"),
    ("bit", "BOOLEAN"),
    ("uniqueidentifier", "TEXT"),
];

static FUNCTIONS: &[(&str, &str)] = &[
    ("sum", "SUM"),
    ("count", "COUNT"),
    ("avg", "AVERAGE"),
    ("min", "MIN"),
    ("max", "MAX"),
    ("stdev", "STDEV.S"),
    ("var", "VAR.S"),
    ("count_big", "COUNT"),
    ("len", "LEN"),
    ("length", "LEN"),
    ("substring", "MID"),
    ("substr", "MID"),
    ("upper", "UPPER"),
    ("lower", "LOWER"),
    ("ltrim", "TRIM"),
    ("rtrim", "TRIM"),
    ("trim", "TRIM"),
    ("left", "LEFT"),
    ("right", "RIGHT"),
    ("replace", "SUBSTITUTE"),
    ("charindex", "FIND"),
    ("concat", "CONCATENATE"),
    ("coalesce", "COALESCE"),
    ("isnull", "IF"),
    ("iif", "IF"),
    ("case", "SWITCH"),
    ("cast", "VALUE"),
    ("convert", "VALUE"),
    ("datepart", "FORMAT"),
    ("datediff", "DATEDIFF"),
    ("dateadd", "DATEADD"),
    ("year", "YEAR"),
    ("month", "MONTH"),
    ("day", "DAY"),
    ("getdate", "NOW"),
    ("current_timestamp", "NOW"),
    ("abs", "ABS"),
    ("round", "ROUND"),
    ("ceiling", "CEILING"),
    ("floor", "FLOOR"),
    ("power", "POWER"),
    ("sqrt", "SQRT"),
    ("row_number", "RANKX"),
    ("rank", "RANKX"),
    ("dense_rank", "RANKX"),
];

/// Operand of a NULL test: a call, a (qualified) bracketed name, or a
/// dotted identifier
macro_rules! null_operand {
    () => {
        r"([A-Za-z_][\w.]*\s*\([^()]*\)|(?:[A-Za-z_][\w.]*)?\[[^\]]*\]|[A-Za-z_][\w.]*)"
    };
}

/// NULL idioms in application order; `IS NOT NULL` must run before `IS NULL`
static NULL_RULES: &[(&str, &str)] = &[
    (
        concat!(null_operand!(), r"\s+IS\s+NOT\s+NULL\b"),
        "NOT(ISBLANK(${1}))",
    ),
    (
        concat!(null_operand!(), r"\s+IS\s+NULL\b"),
        "ISBLANK(${1})",
    ),
    (
        r"\bISNULL\s*\(\s*([^,]+?)\s*,\s*([^)]+?)\s*\)",
        "IF(ISBLANK(${1}), ${2}, ${1})",
    ),
    (r"\bCOALESCE\s*\(", "COALESCE("),
    (
        r"\bNULLIF\s*\(\s*([^,]+?)\s*,\s*([^)]+?)\s*\)",
        "IF(${1} = ${2}, BLANK(), ${1})",
    ),
];

/// Shared SQL mapping tables
pub fn sql_mappings() -> &'static DialectMappings {
    static MAPPINGS: OnceLock<DialectMappings> = OnceLock::new();
    MAPPINGS.get_or_init(|| DialectMappings {
        data_types: MappingTable::new("data_types", DATA_TYPES),
        functions: MappingTable::new("functions", FUNCTIONS),
        null_rules: NullRules::new(NULL_RULES).expect("valid null rules"),
    })
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
