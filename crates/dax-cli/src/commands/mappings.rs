//! Mappings command implementation

use anyhow::Result;
use dax_core::DialectMappings;
use dax_spotfire::spotfire_mappings;
use dax_sql::sql_mappings;
use serde_json::json;

use crate::cli::{DialectArg, GlobalArgs, MappingKind, MappingsArgs, OutputFormat};

/// Execute the mappings command
pub(crate) fn execute(args: &MappingsArgs, global: &GlobalArgs) -> Result<()> {
    let mappings: &DialectMappings = match args.dialect {
        DialectArg::Sql => sql_mappings(),
        DialectArg::Spotfire => spotfire_mappings(),
    };
    let rows = mapping_rows(mappings, args.kind);

    if global.verbose {
        eprintln!("[verbose] {} {:?} entries", rows.len(), args.kind);
    }

    match args.output {
        OutputFormat::Json => {
            let entries: Vec<_> = rows
                .iter()
                .map(|(source, dax)| json!({ "source": source, "dax": dax }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            let width = rows.iter().map(|(source, _)| source.len()).max().unwrap_or(0);
            for (source, dax) in &rows {
                println!("{:<width$}  {}", source, dax, width = width);
            }
        }
    }
    Ok(())
}

/// `(source, dax)` pairs of one table, in table order
fn mapping_rows(mappings: &DialectMappings, kind: MappingKind) -> Vec<(&'static str, &'static str)> {
    match kind {
        MappingKind::DataTypes => mappings.data_types.entries().to_vec(),
        MappingKind::Functions => mappings.functions.entries().to_vec(),
        MappingKind::NullRules => mappings
            .null_rules
            .rules()
            .iter()
            .map(|rule| (rule.source(), rule.template()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_rows() {
        let rows = mapping_rows(sql_mappings(), MappingKind::Functions);
        assert!(rows.contains(&("avg", "AVERAGE")));

        let rows = mapping_rows(spotfire_mappings(), MappingKind::DataTypes);
        assert!(rows.contains(&("real", "DOUBLE")));

        let rows = mapping_rows(spotfire_mappings(), MappingKind::NullRules);
        assert_eq!(rows.len(), spotfire_mappings().null_rules.len());
        assert_eq!(rows[0].1, "ISBLANK(${1})");
    }
}
