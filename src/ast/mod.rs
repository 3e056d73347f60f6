//! Syntax tree node types.
//!
//! Nodes are immutable values built bottom-up by the parser. Every node
//! records the byte span of the source text it was parsed from.

mod expression;
mod identifier;
mod query;
mod relation;
mod span;
mod statement;
mod types;

pub use span::{Span, Spanned, merge};

pub use identifier::{Identifier, QualifiedName, Quoting};

pub use types::{ArraySyntax, BaseType, DataType, IntervalField, RowField, TypeParameter};

pub use expression::{
    BinaryOperator, ComparisonOperator, ComparisonQuantifier, CurrentTimeFunction, Expression,
    FrameBound, FrameUnits, FunctionCall, Literal, LogicalOperator, NormalForm, NullOrdering,
    NullTreatment, Ordering, SetQuantifier, Sign, SortItem, UnaryOperator, WhenClause, Window,
    WindowFrame,
};

pub use query::{
    GroupBy, GroupingElement, Limit, Offset, Query, QueryBody, QuerySpecification, SelectItem,
    SetOperator, With, WithQuery,
};

pub use relation::{
    Join, JoinCriteria, JoinType, Relation, SampleMethod, TableVersion, TableVersionKind,
    TableVersionOperator,
};

pub use statement::{
    AlterTableAction, CallArgument, ColumnDefinition, ConstraintKind, ConstraintSpecification,
    DropBehavior, ExplainFormat, ExplainOption, ExplainType, Grantor, IsolationLevel,
    LikePattern, LikeProperties, NullCallClause, ParameterDeclaration, Principal, Privileges,
    Property, RoleSelection, RoutineBody, RoutineCharacteristics, RoutineLanguage,
    ShowCreateObject, ShowStatsTarget, Statement, TableElement, TransactionMode,
    TypeDefinition, UpdateAssignment, ViewSecurity,
};
