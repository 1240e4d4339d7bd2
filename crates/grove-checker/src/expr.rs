//! Best-effort expression typing.
//!
//! `ExpressionTyper` is the default [`ReferenceResolver`] and [`TypeProvider`] for
//! hosts that bind a file with `grove-binder`. It types literals, collection and
//! closure literals, casts, `new` expressions, references to typed declarations and
//! calls to methods with a known return type. Anything else is unknown (`None`), which
//! makes every rule that needs the type stay silent.
//!
//! Untyped (`def`) declarations have type `java.lang.Object`; generics are erased.

use crate::context::{CheckerOptions, ReferenceResolver, TypeProvider};
use grove_binder::{
    BinderState, ReceiverTypes, Resolution, ScopeResolver, Symbol, SymbolFlags, SymbolId, SymbolKind,
    SymbolTable,
};
use grove_common::limits::MAX_QUALIFIER_DEPTH;
use grove_solver::{CallableSignature, ParamInfo, PrimitiveKind, TypeEnvironment, TypeId, TypeInterner};
use grove_syntax::{LiteralKind, NodeArena, NodeIndex, PrimitiveKeyword, SyntaxKind};
use grove_syntax::node::CallData;
use tracing::trace;

pub struct ExpressionTyper<'a> {
    scopes: ScopeResolver<'a>,
    types: &'a TypeInterner,
    env: &'a TypeEnvironment,
}

impl<'a> ExpressionTyper<'a> {
    pub fn new(scopes: ScopeResolver<'a>, types: &'a TypeInterner, env: &'a TypeEnvironment) -> Self {
        ExpressionTyper { scopes, types, env }
    }

    /// Typer over a bound file, resolving with the implicit imports of `options`.
    pub fn with_options(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        types: &'a TypeInterner,
        env: &'a TypeEnvironment,
        options: &CheckerOptions,
    ) -> Self {
        Self::new(options.scope_resolver(arena, binder), types, env)
    }

    #[inline]
    pub fn scopes(&self) -> &ScopeResolver<'a> {
        &self.scopes
    }

    #[inline]
    fn arena(&self) -> &'a NodeArena {
        self.scopes.arena()
    }

    #[inline]
    fn symbols(&self) -> &'a SymbolTable {
        self.scopes.symbols()
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn type_of(&self, expression: NodeIndex) -> Option<TypeId> {
        let ty = self.type_at_depth(expression, 0);
        trace!(expression = expression.0, ty = ?ty.map(|t| t.0), "expression type");
        ty
    }

    fn type_at_depth(&self, expression: NodeIndex, depth: usize) -> Option<TypeId> {
        if depth > MAX_QUALIFIER_DEPTH {
            return None;
        }
        let arena = self.arena();
        let node = arena.get(expression)?;
        match node.kind {
            SyntaxKind::Literal => Some(literal_type(arena.get_literal(node)?.kind)),
            SyntaxKind::ListLiteral => Some(TypeId::ARRAY_LIST),
            SyntaxKind::MapLiteral => Some(TypeId::LINKED_HASH_MAP),
            SyntaxKind::ClosureExpression => Some(TypeId::CLOSURE),
            SyntaxKind::ParenthesizedExpression => {
                self.type_at_depth(arena.get_parenthesized(node)?.expression, depth + 1)
            }
            SyntaxKind::CastExpression => self.type_of_type_node(arena.get_cast(node)?.type_ref),
            SyntaxKind::NewExpression => self.type_of_type_node(arena.get_new(node)?.type_ref),
            SyntaxKind::AssignmentExpression => {
                let assignment = arena.get_assignment(node)?;
                if assignment.operator.is_simple() {
                    self.type_at_depth(assignment.right, depth + 1)
                } else {
                    None
                }
            }
            SyntaxKind::ReferenceExpression => self.reference_type(expression),
            SyntaxKind::CallExpression => self.call_type(arena.get_call(node)?),
            _ => None,
        }
    }

    fn reference_type(&self, reference: NodeIndex) -> Option<TypeId> {
        let symbol = self.symbols().get(self.resolve(reference).symbol()?)?;
        match symbol.kind {
            SymbolKind::Field | SymbolKind::Variable | SymbolKind::Parameter => {
                self.variable_type(symbol)
            }
            // Property access through a getter.
            SymbolKind::Method => self.signature_of(symbol.id)?.return_type,
            SymbolKind::Class => Some(self.types.class("java.lang.Class")),
            SymbolKind::Package => None,
        }
    }

    fn call_type(&self, call: &CallData) -> Option<TypeId> {
        if self.arena().kind(call.callee) != Some(SyntaxKind::ReferenceExpression) {
            return None;
        }
        let symbol = self.resolve(call.callee).symbol()?;
        self.signature_of(symbol)?.return_type
    }

    fn variable_type(&self, symbol: &Symbol) -> Option<TypeId> {
        self.env
            .declared_type(symbol.id)
            .or_else(|| self.declaration_type(symbol.declaration))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declared type of a field, parameter or local; `Object` when untyped.
    pub fn declaration_type(&self, declaration: NodeIndex) -> Option<TypeId> {
        let variable = self.arena().get_variable_at(declaration)?;
        let declared = if variable.type_ref.is_some() {
            self.type_of_type_node(variable.type_ref)?
        } else {
            TypeId::OBJECT
        };
        Some(if variable.is_varargs {
            self.types.array(declared)
        } else {
            declared
        })
    }

    /// Type denoted by a type node (`int`, `String[]`, `java.util.List`).
    pub fn type_of_type_node(&self, node: NodeIndex) -> Option<TypeId> {
        let arena = self.arena();
        let n = arena.get(node)?;
        match n.kind {
            SyntaxKind::PrimitiveType => {
                let keyword = arena.get_primitive_type(n)?.keyword;
                Some(self.types.primitive(primitive_kind(keyword)))
            }
            SyntaxKind::ArrayType => {
                let element = self.type_of_type_node(arena.get_array_type(n)?.element)?;
                Some(self.types.array(element))
            }
            SyntaxKind::TypeOrPackageReference => {
                let symbol = self.symbols().get(self.scopes.resolve(node).symbol()?)?;
                symbol
                    .is_class()
                    .then(|| self.types.class(&symbol.qualified_name))
            }
            _ => None,
        }
    }

    /// Signature of a method symbol: the host environment first, then the
    /// method's declaration in the bound file.
    pub fn signature_of(&self, method: SymbolId) -> Option<CallableSignature> {
        let symbol = self.symbols().get(method)?;
        if !symbol.is_method() {
            return None;
        }
        let mut signature = match self.env.signature(method) {
            Some(signature) => signature.clone(),
            None => self.declared_signature(symbol.declaration)?,
        };
        signature.is_builder |= symbol.flags.contains(SymbolFlags::BUILDER_METHOD);
        Some(signature)
    }

    fn declared_signature(&self, declaration: NodeIndex) -> Option<CallableSignature> {
        let arena = self.arena();
        let method = arena.get_method(arena.get(declaration)?)?;

        let mut params = Vec::with_capacity(method.parameters.len());
        let mut is_varargs = false;
        for param in method.parameters.iter() {
            let Some(variable) = arena.get_variable_at(param) else {
                continue;
            };
            // Untyped parameters accept anything; untyped varargs still bind as Object[].
            let ty = if variable.type_ref.is_some() || variable.is_varargs {
                self.declaration_type(param)
            } else {
                None
            };
            is_varargs = variable.is_varargs;
            params.push(ParamInfo {
                ty,
                optional: variable.initializer.is_some(),
            });
        }

        let mut signature = CallableSignature::new(params, self.type_of_type_node(method.return_type));
        signature.is_varargs = is_varargs;
        Some(signature)
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// The call whose callee is `reference`.
    fn enclosing_call(&self, reference: NodeIndex) -> Option<&'a CallData> {
        let arena = self.arena();
        let call = arena.get_call(arena.get(arena.parent(reference))?)?;
        (call.callee == reference).then_some(call)
    }

    fn resolve(&self, reference: NodeIndex) -> Resolution {
        self.scopes.resolve_with(reference, self)
    }
}

impl ReceiverTypes for ExpressionTyper<'_> {
    fn receiver_class(&self, qualifier: NodeIndex) -> Option<SymbolId> {
        let ty = self.type_of(qualifier)?;
        let ty = self
            .types
            .primitive_kind(ty)
            .and_then(PrimitiveKind::boxed)
            .unwrap_or(ty);
        let name = self.types.class_name(ty)?;
        self.symbols().class(&name)
    }
}

impl ReferenceResolver for ExpressionTyper<'_> {
    fn resolve_reference(&self, reference: NodeIndex) -> Resolution {
        self.resolve(reference)
    }

    fn symbol_kind(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.symbols().get(symbol).map(|s| s.kind)
    }
}

impl TypeProvider for ExpressionTyper<'_> {
    fn expression_type(&self, expression: NodeIndex) -> Option<TypeId> {
        self.type_of(expression)
    }

    fn declared_type(&self, declaration: NodeIndex) -> Option<TypeId> {
        let symbol = self.scopes.binder().symbol_of(declaration);
        symbol
            .and_then(|symbol| self.env.declared_type(symbol))
            .or_else(|| self.declaration_type(declaration))
    }

    fn callable_signature(&self, symbol: SymbolId) -> Option<CallableSignature> {
        self.signature_of(symbol)
    }

    fn argument_types(&self, reference: NodeIndex) -> Option<Vec<Option<TypeId>>> {
        let call = self.enclosing_call(reference)?;
        let arena = self.arena();
        let types = arena
            .get(call.arguments)
            .and_then(|node| arena.get_argument_list(node))
            .map(|list| list.arguments.iter().map(|arg| self.type_of(arg)).collect())
            .unwrap_or_default();
        Some(types)
    }

    fn arguments_element(&self, reference: NodeIndex) -> Option<NodeIndex> {
        let call = self.enclosing_call(reference)?;
        (self.arena().kind(call.arguments) == Some(SyntaxKind::ArgumentList))
            .then_some(call.arguments)
    }
}

fn literal_type(kind: LiteralKind) -> TypeId {
    match kind {
        LiteralKind::Integer => TypeId::INTEGER,
        LiteralKind::Long => TypeId::BOXED_LONG,
        LiteralKind::Decimal => TypeId::BIG_DECIMAL,
        LiteralKind::Double => TypeId::BOXED_DOUBLE,
        LiteralKind::Float => TypeId::BOXED_FLOAT,
        LiteralKind::String => TypeId::STRING,
        LiteralKind::GString => TypeId::GSTRING,
        LiteralKind::True | LiteralKind::False => TypeId::BOXED_BOOLEAN,
        LiteralKind::Null => TypeId::NULL,
    }
}

fn primitive_kind(keyword: PrimitiveKeyword) -> PrimitiveKind {
    match keyword {
        PrimitiveKeyword::Boolean => PrimitiveKind::Boolean,
        PrimitiveKeyword::Char => PrimitiveKind::Char,
        PrimitiveKeyword::Byte => PrimitiveKind::Byte,
        PrimitiveKeyword::Short => PrimitiveKind::Short,
        PrimitiveKeyword::Int => PrimitiveKind::Int,
        PrimitiveKeyword::Long => PrimitiveKind::Long,
        PrimitiveKeyword::Float => PrimitiveKind::Float,
        PrimitiveKeyword::Double => PrimitiveKind::Double,
        PrimitiveKeyword::Void => PrimitiveKind::Void,
    }
}
