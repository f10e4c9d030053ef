pub type TableName = String;
pub type ColumnName = String;
