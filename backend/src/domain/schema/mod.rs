//! Declarative entity schemas.
//!
//! An [`EntitySchema`] is the single description of a persisted table: column
//! names, types, nullability, length limits, default-generation rules and
//! uniqueness. Nothing here enforces those constraints; validators in
//! [`crate::domain::validation`] and the PostgreSQL DDL in
//! `backend/migrations` are both derived from these definitions.

mod contact_submissions;
mod users;

pub use contact_submissions::CONTACT_SUBMISSIONS;
pub use users::USERS;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 128-bit UUID.
    Uuid,
    /// Auto-incrementing 32-bit integer.
    Serial,
    /// Variable-length character string, bounded by [`Column::max_length`].
    Varchar,
    /// Point in time stored with its UTC offset.
    Timestamp,
}

impl ColumnType {
    fn sql(self, max_length: Option<usize>) -> String {
        match (self, max_length) {
            (Self::Uuid, _) => "uuid".to_owned(),
            (Self::Serial, _) => "serial".to_owned(),
            (Self::Varchar, Some(max)) => format!("varchar({max})"),
            (Self::Varchar, None) => "varchar".to_owned(),
            (Self::Timestamp, _) => "timestamptz".to_owned(),
        }
    }
}

/// Rule used by storage to fill a column the caller did not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// A random UUID generated by the database.
    RandomUuid,
    /// The next value of the column's sequence.
    Sequence,
    /// The transaction timestamp at insert time.
    Now,
}

impl ColumnDefault {
    fn sql(self) -> Option<&'static str> {
        match self {
            Self::RandomUuid => Some("gen_random_uuid()"),
            // `serial` already owns its sequence default.
            Self::Sequence => None,
            Self::Now => Some("now()"),
        }
    }
}

/// Column metadata.
///
/// Columns start nullable, matching SQL; use [`Column::not_null`] to require
/// a value. Primary keys are implicitly non-null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    name: &'static str,
    column_type: ColumnType,
    nullable: bool,
    max_length: Option<usize>,
    default: Option<ColumnDefault>,
    unique: bool,
    primary_key: bool,
}

impl Column {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: true,
            max_length: None,
            default: None,
            unique: false,
            primary_key: false,
        }
    }

    /// UUID column.
    pub const fn uuid(name: &'static str) -> Self {
        Self::new(name, ColumnType::Uuid)
    }

    /// Sequence-backed integer column; always generated by storage.
    pub const fn serial(name: &'static str) -> Self {
        let column = Self::new(name, ColumnType::Serial);
        column.default(ColumnDefault::Sequence)
    }

    /// Bounded string column.
    pub const fn varchar(name: &'static str, max_length: usize) -> Self {
        let mut column = Self::new(name, ColumnType::Varchar);
        column.max_length = Some(max_length);
        column
    }

    /// Timestamp column.
    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, ColumnType::Timestamp)
    }

    /// Mark the column as the table's primary key.
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Require a value in every row.
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Require the value to be unique across rows.
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Let storage generate the value when it is omitted.
    pub const fn default(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Column name as stored and as exposed in payloads.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Storage type.
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Whether the column admits `NULL`.
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Maximum length in characters, when bounded.
    pub const fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Default-generation rule, if any.
    pub const fn default_rule(&self) -> Option<ColumnDefault> {
        self.default
    }

    /// Whether storage rejects duplicate values.
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether the column is the primary key.
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Whether a client must supply this column when creating a row.
    pub const fn is_required_on_insert(&self) -> bool {
        !self.nullable && self.default.is_none()
    }

    fn sql_definition(&self) -> String {
        let mut definition = format!("{} {}", self.name, self.column_type.sql(self.max_length));
        if self.primary_key {
            definition.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            definition.push_str(" NOT NULL");
        }
        if self.unique && !self.primary_key {
            definition.push_str(" UNIQUE");
        }
        if let Some(default) = self.default.and_then(ColumnDefault::sql) {
            definition.push_str(" DEFAULT ");
            definition.push_str(default);
        }
        definition
    }
}

/// Declarative description of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    table: &'static str,
    columns: &'static [Column],
}

impl EntitySchema {
    /// Describe `table` with the given columns, in storage order.
    pub const fn new(table: &'static str, columns: &'static [Column]) -> Self {
        Self { table, columns }
    }

    /// Table name.
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Columns in storage order.
    pub const fn columns(&self) -> &'static [Column] {
        self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Render the PostgreSQL `CREATE TABLE` statement for this entity.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::schema::USERS;
    ///
    /// let ddl = USERS.create_table_sql();
    /// assert!(ddl.starts_with("CREATE TABLE users ("));
    /// assert!(ddl.contains("username varchar(255) NOT NULL UNIQUE"));
    /// ```
    pub fn create_table_sql(&self) -> String {
        let definitions: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("    {}", column.sql_definition()))
            .collect();
        format!(
            "CREATE TABLE {} (\n{}\n);\n",
            self.table,
            definitions.join(",\n")
        )
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for column metadata and DDL rendering.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Column::varchar("name", 255).not_null(), true)]
    #[case(Column::varchar("company", 255), false)]
    #[case(Column::uuid("id").primary_key().default(ColumnDefault::RandomUuid), false)]
    #[case(Column::serial("id").primary_key(), false)]
    #[case(Column::timestamp("created_at").not_null().default(ColumnDefault::Now), false)]
    fn insert_requirement_follows_nullability_and_defaults(
        #[case] column: Column,
        #[case] required: bool,
    ) {
        assert_eq!(column.is_required_on_insert(), required);
    }

    #[test]
    fn primary_keys_are_not_nullable() {
        let column = Column::uuid("id").primary_key();
        assert!(!column.is_nullable());
        assert!(column.is_primary_key());
    }

    #[rstest]
    #[case(Column::varchar("email", 255).not_null(), "email varchar(255) NOT NULL")]
    #[case(Column::varchar("service", 255), "service varchar(255)")]
    #[case(Column::serial("id").primary_key(), "id serial PRIMARY KEY")]
    #[case(
        Column::uuid("id").primary_key().default(ColumnDefault::RandomUuid),
        "id uuid PRIMARY KEY DEFAULT gen_random_uuid()"
    )]
    #[case(
        Column::varchar("username", 255).not_null().unique(),
        "username varchar(255) NOT NULL UNIQUE"
    )]
    #[case(
        Column::timestamp("created_at").not_null().default(ColumnDefault::Now),
        "created_at timestamptz NOT NULL DEFAULT now()"
    )]
    fn column_definitions_render_postgres_types(#[case] column: Column, #[case] expected: &str) {
        assert_eq!(column.sql_definition(), expected);
    }

    #[test]
    fn column_lookup_finds_declared_columns_only() {
        assert!(CONTACT_SUBMISSIONS.column("message").is_some());
        assert!(CONTACT_SUBMISSIONS.column("username").is_none());
        assert_eq!(USERS.column("username").map(Column::is_unique), Some(true));
    }
}
