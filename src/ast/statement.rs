//! Statement AST nodes.
//!
//! One [`Statement`] variant per statement form. Optional clauses that only
//! toggle behaviour (`IF EXISTS`, `OR REPLACE`, ...) are plain booleans.

use crate::ast::{
    DataType, Expression, Identifier, QualifiedName, Query, QuerySpecification, Span,
};
use smol_str::SmolStr;

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Query(Box<Query>),

    // ------------------------------------------------------------------
    // Session and catalog
    // ------------------------------------------------------------------
    /// `USE [catalog.]schema`
    Use {
        catalog: Option<Identifier>,
        schema: Identifier,
        span: Span,
    },
    /// `SET SESSION name = value`
    SetSession {
        name: QualifiedName,
        value: Expression,
        span: Span,
    },
    /// `RESET SESSION name`
    ResetSession { name: QualifiedName, span: Span },
    /// `SHOW SESSION [LIKE ...]`
    ShowSession {
        like: Option<LikePattern>,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Schema DDL
    // ------------------------------------------------------------------
    CreateSchema {
        name: QualifiedName,
        if_not_exists: bool,
        properties: Vec<Property>,
        span: Span,
    },
    DropSchema {
        name: QualifiedName,
        if_exists: bool,
        behavior: Option<DropBehavior>,
        span: Span,
    },
    /// `ALTER SCHEMA name RENAME TO new_name`
    RenameSchema {
        name: QualifiedName,
        new_name: Identifier,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Table DDL
    // ------------------------------------------------------------------
    CreateTable {
        name: QualifiedName,
        if_not_exists: bool,
        elements: Vec<TableElement>,
        comment: Option<SmolStr>,
        properties: Vec<Property>,
        span: Span,
    },
    /// `CREATE TABLE ... AS query [WITH [NO] DATA]`
    CreateTableAsSelect {
        name: QualifiedName,
        if_not_exists: bool,
        column_aliases: Vec<Identifier>,
        comment: Option<SmolStr>,
        properties: Vec<Property>,
        query: Box<Query>,
        /// False for `WITH NO DATA`.
        with_data: bool,
        span: Span,
    },
    DropTable {
        name: QualifiedName,
        if_exists: bool,
        span: Span,
    },
    TruncateTable { name: QualifiedName, span: Span },
    /// `ANALYZE name [WITH properties]`
    Analyze {
        name: QualifiedName,
        properties: Vec<Property>,
        span: Span,
    },
    /// `ALTER TABLE [IF EXISTS] table action`
    AlterTable {
        table: QualifiedName,
        if_exists: bool,
        action: AlterTableAction,
        span: Span,
    },

    // ------------------------------------------------------------------
    // View DDL
    // ------------------------------------------------------------------
    CreateView {
        name: QualifiedName,
        replace: bool,
        security: Option<ViewSecurity>,
        query: Box<Query>,
        span: Span,
    },
    RenameView {
        from: QualifiedName,
        to: QualifiedName,
        if_exists: bool,
        span: Span,
    },
    DropView {
        name: QualifiedName,
        if_exists: bool,
        span: Span,
    },
    CreateMaterializedView {
        name: QualifiedName,
        if_not_exists: bool,
        comment: Option<SmolStr>,
        properties: Vec<Property>,
        query: Box<Query>,
        span: Span,
    },
    DropMaterializedView {
        name: QualifiedName,
        if_exists: bool,
        span: Span,
    },
    /// `REFRESH MATERIALIZED VIEW name WHERE predicate`
    RefreshMaterializedView {
        name: QualifiedName,
        predicate: Expression,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Type and function DDL
    // ------------------------------------------------------------------
    CreateType {
        name: QualifiedName,
        definition: TypeDefinition,
        span: Span,
    },
    CreateFunction {
        name: QualifiedName,
        replace: bool,
        temporary: bool,
        parameters: Vec<ParameterDeclaration>,
        return_type: DataType,
        comment: Option<SmolStr>,
        characteristics: RoutineCharacteristics,
        body: RoutineBody,
        span: Span,
    },
    /// `ALTER FUNCTION name [(types)] null_call_clause*`
    AlterFunction {
        name: QualifiedName,
        parameter_types: Option<Vec<DataType>>,
        null_call: Option<NullCallClause>,
        span: Span,
    },
    DropFunction {
        name: QualifiedName,
        temporary: bool,
        if_exists: bool,
        parameter_types: Option<Vec<DataType>>,
        span: Span,
    },
    ShowCreateFunction {
        name: QualifiedName,
        parameter_types: Option<Vec<DataType>>,
        span: Span,
    },
    /// `SHOW CREATE {TABLE | VIEW | MATERIALIZED VIEW} name`
    ShowCreate {
        object: ShowCreateObject,
        name: QualifiedName,
        span: Span,
    },
    /// `CALL name(args)`
    Call {
        name: QualifiedName,
        arguments: Vec<CallArgument>,
        span: Span,
    },

    // ------------------------------------------------------------------
    // DML
    // ------------------------------------------------------------------
    Insert {
        target: QualifiedName,
        columns: Vec<Identifier>,
        query: Box<Query>,
        span: Span,
    },
    Delete {
        table: QualifiedName,
        where_clause: Option<Expression>,
        span: Span,
    },
    Update {
        table: QualifiedName,
        assignments: Vec<UpdateAssignment>,
        where_clause: Option<Expression>,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Security
    // ------------------------------------------------------------------
    CreateRole {
        name: Identifier,
        grantor: Option<Grantor>,
        span: Span,
    },
    DropRole { name: Identifier, span: Span },
    GrantRoles {
        roles: Vec<Identifier>,
        grantees: Vec<Principal>,
        admin_option: bool,
        grantor: Option<Grantor>,
        span: Span,
    },
    RevokeRoles {
        roles: Vec<Identifier>,
        grantees: Vec<Principal>,
        admin_option: bool,
        grantor: Option<Grantor>,
        span: Span,
    },
    SetRole { role: RoleSelection, span: Span },
    /// `GRANT privileges ON [TABLE] name TO grantee [WITH GRANT OPTION]`
    Grant {
        privileges: Privileges,
        table: QualifiedName,
        grantee: Principal,
        grant_option: bool,
        span: Span,
    },
    /// `REVOKE [GRANT OPTION FOR] privileges ON [TABLE] name FROM grantee`
    Revoke {
        grant_option: bool,
        privileges: Privileges,
        table: QualifiedName,
        grantee: Principal,
        span: Span,
    },
    ShowGrants {
        table: Option<QualifiedName>,
        span: Span,
    },
    ShowRoles {
        current: bool,
        catalog: Option<Identifier>,
        span: Span,
    },
    ShowRoleGrants {
        catalog: Option<Identifier>,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------
    ShowTables {
        schema: Option<QualifiedName>,
        like: Option<LikePattern>,
        span: Span,
    },
    ShowSchemas {
        catalog: Option<Identifier>,
        like: Option<LikePattern>,
        span: Span,
    },
    ShowCatalogs {
        like: Option<LikePattern>,
        span: Span,
    },
    /// `SHOW COLUMNS FROM name`, `DESCRIBE name`, `DESC name`
    ShowColumns { table: QualifiedName, span: Span },
    ShowStats { target: ShowStatsTarget, span: Span },
    ShowFunctions {
        like: Option<LikePattern>,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------
    Explain {
        analyze: bool,
        verbose: bool,
        options: Vec<ExplainOption>,
        statement: Box<Statement>,
        span: Span,
    },

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------
    StartTransaction {
        modes: Vec<TransactionMode>,
        span: Span,
    },
    Commit { span: Span },
    Rollback { span: Span },

    // ------------------------------------------------------------------
    // Prepared statements
    // ------------------------------------------------------------------
    Prepare {
        name: Identifier,
        statement: Box<Statement>,
        span: Span,
    },
    Deallocate { name: Identifier, span: Span },
    Execute {
        name: Identifier,
        parameters: Vec<Expression>,
        span: Span,
    },
    DescribeInput { name: Identifier, span: Span },
    DescribeOutput { name: Identifier, span: Span },
}

impl Statement {
    /// Returns the source span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Statement::Query(query) => query.span.clone(),
            Statement::Use { span, .. }
            | Statement::SetSession { span, .. }
            | Statement::ResetSession { span, .. }
            | Statement::ShowSession { span, .. }
            | Statement::CreateSchema { span, .. }
            | Statement::DropSchema { span, .. }
            | Statement::RenameSchema { span, .. }
            | Statement::CreateTable { span, .. }
            | Statement::CreateTableAsSelect { span, .. }
            | Statement::DropTable { span, .. }
            | Statement::TruncateTable { span, .. }
            | Statement::Analyze { span, .. }
            | Statement::AlterTable { span, .. }
            | Statement::CreateView { span, .. }
            | Statement::RenameView { span, .. }
            | Statement::DropView { span, .. }
            | Statement::CreateMaterializedView { span, .. }
            | Statement::DropMaterializedView { span, .. }
            | Statement::RefreshMaterializedView { span, .. }
            | Statement::CreateType { span, .. }
            | Statement::CreateFunction { span, .. }
            | Statement::AlterFunction { span, .. }
            | Statement::DropFunction { span, .. }
            | Statement::ShowCreateFunction { span, .. }
            | Statement::ShowCreate { span, .. }
            | Statement::Call { span, .. }
            | Statement::Insert { span, .. }
            | Statement::Delete { span, .. }
            | Statement::Update { span, .. }
            | Statement::CreateRole { span, .. }
            | Statement::DropRole { span, .. }
            | Statement::GrantRoles { span, .. }
            | Statement::RevokeRoles { span, .. }
            | Statement::SetRole { span, .. }
            | Statement::Grant { span, .. }
            | Statement::Revoke { span, .. }
            | Statement::ShowGrants { span, .. }
            | Statement::ShowRoles { span, .. }
            | Statement::ShowRoleGrants { span, .. }
            | Statement::ShowTables { span, .. }
            | Statement::ShowSchemas { span, .. }
            | Statement::ShowCatalogs { span, .. }
            | Statement::ShowColumns { span, .. }
            | Statement::ShowStats { span, .. }
            | Statement::ShowFunctions { span, .. }
            | Statement::Explain { span, .. }
            | Statement::StartTransaction { span, .. }
            | Statement::Commit { span }
            | Statement::Rollback { span }
            | Statement::Prepare { span, .. }
            | Statement::Deallocate { span, .. }
            | Statement::Execute { span, .. }
            | Statement::DescribeInput { span, .. }
            | Statement::DescribeOutput { span, .. } => span.clone(),
        }
    }
}

// ============================================================================
// Table DDL parts
// ============================================================================

/// `name = value` inside `WITH (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    Cascade,
    Restrict,
}

/// An entry in the element list of `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(ColumnDefinition),
    Constraint(ConstraintSpecification),
    /// `LIKE name [{INCLUDING | EXCLUDING} PROPERTIES]`
    Like {
        table: QualifiedName,
        properties: Option<LikeProperties>,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeProperties {
    Including,
    Excluding,
}

/// `name type [NOT NULL] [COMMENT '...'] [WITH (...)]`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: Identifier,
    pub data_type: DataType,
    pub nullable: bool,
    pub comment: Option<SmolStr>,
    pub properties: Vec<Property>,
    pub span: Span,
}

/// `[CONSTRAINT name] {UNIQUE | PRIMARY KEY} (columns) qualifiers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSpecification {
    pub name: Option<Identifier>,
    pub kind: ConstraintKind,
    pub columns: Vec<Identifier>,
    /// `ENABLED` / `DISABLED`
    pub enabled: Option<bool>,
    /// `RELY` / `NOT RELY`
    pub rely: Option<bool>,
    /// `ENFORCED` / `NOT ENFORCED`
    pub enforced: Option<bool>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    PrimaryKey,
}

/// The action of an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    RenameTo(QualifiedName),
    RenameColumn {
        if_exists: bool,
        from: Identifier,
        to: Identifier,
    },
    DropColumn {
        if_exists: bool,
        column: QualifiedName,
    },
    AddColumn {
        if_not_exists: bool,
        column: ColumnDefinition,
    },
    AddConstraint(ConstraintSpecification),
    DropConstraint {
        if_exists: bool,
        name: Identifier,
    },
    /// `ALTER [COLUMN] name {SET | DROP} NOT NULL`
    AlterColumnNotNull { column: Identifier, not_null: bool },
    SetProperties(Vec<Property>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSecurity {
    Definer,
    Invoker,
}

// ============================================================================
// Type and routine parts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition {
    /// `AS (name type, ...)`
    Struct(Vec<ParameterDeclaration>),
    /// `AS type`
    Distinct(DataType),
}

/// `name type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    pub name: Identifier,
    pub data_type: DataType,
    pub span: Span,
}

/// Routine characteristics; each may be given at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutineCharacteristics {
    pub language: Option<RoutineLanguage>,
    pub deterministic: Option<bool>,
    pub null_call: Option<NullCallClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineLanguage {
    Sql,
    Other(Identifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullCallClause {
    /// `RETURNS NULL ON NULL INPUT`
    ReturnsNullOnNullInput,
    /// `CALLED ON NULL INPUT`
    CalledOnNullInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoutineBody {
    /// `RETURN expr`
    Return(Expression),
    /// `EXTERNAL [NAME name]`
    External(Option<Identifier>),
}

/// A `CALL` argument, positional or `name => value`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArgument {
    pub name: Option<Identifier>,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCreateObject {
    Table,
    View,
    MaterializedView,
}

// ============================================================================
// DML parts
// ============================================================================

/// `column = value` in `UPDATE ... SET`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssignment {
    pub column: Identifier,
    pub value: Expression,
    pub span: Span,
}

// ============================================================================
// Security parts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User(Identifier),
    Role(Identifier),
    /// A bare name with no `USER` / `ROLE` marker.
    Unspecified(Identifier),
}

/// `GRANTED BY` / `WITH ADMIN` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grantor {
    CurrentUser,
    CurrentRole,
    Principal(Principal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelection {
    All,
    None,
    Role(Identifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Privileges {
    /// `ALL PRIVILEGES`
    All,
    /// `SELECT`, `INSERT`, `DELETE` or any identifier
    Named(Vec<Identifier>),
}

// ============================================================================
// Introspection parts
// ============================================================================

/// `LIKE 'pattern' [ESCAPE 'c']`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    pub pattern: SmolStr,
    pub escape: Option<SmolStr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowStatsTarget {
    Table(QualifiedName),
    /// `SHOW STATS FOR (SELECT ...)`
    Query(Box<QuerySpecification>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplainOption {
    Format(ExplainFormat),
    Type(ExplainType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplainFormat {
    Text,
    Graphviz,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplainType {
    Logical,
    Distributed,
    Validate,
    Io,
}

// ============================================================================
// Transaction parts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    Isolation(IsolationLevel),
    /// `READ ONLY` when true, `READ WRITE` otherwise.
    ReadOnly(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}
