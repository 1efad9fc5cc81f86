use indexmap::IndexMap;

use super::{
    Access, Assignment, FunctionDefinition, Id, Identifiers, OperatorBinding, ScopedEval,
    ScopedExtract, arithmetic,
};
use crate::context::{Binding, IdentifierProvider};
use crate::values::{NativeFn, NativeFunction};

/// Precedences of the standard operators. Lower values split first.
pub mod precedence {
    pub const ASSIGNMENT: i32 = 0;
    pub const FUNCTION: i32 = 5;
    pub const ADDITIVE: i32 = 10;
    pub const MULTIPLICATIVE: i32 = 20;
    pub const SUM: i32 = 30;
    pub const PREFIX: i32 = crate::operators::IMPLICIT_PRECEDENCE;
    pub const ACCESS: i32 = 999;
    pub const SCOPE: i32 = 1000;
}

/// Provider of the standard operator set. Enumerable.
pub struct StandardOperators {
    table: IndexMap<&'static str, OperatorBinding>,
}

impl StandardOperators {
    pub fn new() -> Self {
        let simple = |name: &'static str, func: NativeFn, precedence: i32| {
            (name, OperatorBinding::simple(NativeFunction::new(name, func), precedence))
        };

        let table = IndexMap::from([
            ("=", OperatorBinding::special(Assignment, precedence::ASSIGNMENT)),
            ("->", OperatorBinding::special(FunctionDefinition, precedence::FUNCTION)),
            simple("+", arithmetic::add, precedence::ADDITIVE),
            simple("-", arithmetic::subtract, precedence::ADDITIVE),
            simple("*", arithmetic::multiply, precedence::MULTIPLICATIVE),
            simple("/", arithmetic::divide, precedence::MULTIPLICATIVE),
            simple("sum", arithmetic::sum, precedence::SUM),
            simple("random", arithmetic::random, precedence::PREFIX),
            ("identifiers", OperatorBinding::special(Identifiers, precedence::PREFIX)),
            ("id", OperatorBinding::special(Id, precedence::PREFIX)),
            (".", OperatorBinding::special(Access, precedence::ACCESS)),
            ("$", OperatorBinding::special(ScopedEval, precedence::SCOPE)),
            ("@", OperatorBinding::special(ScopedExtract, precedence::SCOPE)),
        ]);

        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<&OperatorBinding> {
        self.table.get(name)
    }
}

impl Default for StandardOperators {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierProvider for StandardOperators {
    fn provide(&self, name: &str) -> Option<Binding> {
        self.table.get(name).cloned().map(Binding::Operator)
    }

    fn items(&self) -> Vec<(String, Binding)> {
        self.table
            .iter()
            .map(|(name, op)| (name.to_string(), Binding::Operator(op.clone())))
            .collect()
    }
}
