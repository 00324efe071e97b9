use super::ColumnMacros;

pub fn projection(pk: &ColumnMacros, columns: &[ColumnMacros]) -> Vec<String> {
    std::iter::once(pk).chain(columns).map(|c| c.column.column_name.clone()).collect()
}
