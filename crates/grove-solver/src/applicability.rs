//! Argument/parameter matching for resolved callables.

use crate::compat::CompatChecker;
use crate::types::TypeId;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamInfo {
    /// `None` for untyped (`def`) parameters, which accept anything.
    pub ty: Option<TypeId>,
    /// Has a default value and may be omitted.
    pub optional: bool,
}

impl ParamInfo {
    pub const fn required(ty: Option<TypeId>) -> Self {
        ParamInfo {
            ty,
            optional: false,
        }
    }

    pub const fn optional(ty: Option<TypeId>) -> Self {
        ParamInfo { ty, optional: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallableSignature {
    pub params: Vec<ParamInfo>,
    pub return_type: Option<TypeId>,
    /// The last parameter is `T...`; its declared type is the array `T[]`.
    pub is_varargs: bool,
    /// Builder-style callable exempt from applicability checks.
    pub is_builder: bool,
}

impl CallableSignature {
    pub fn new(params: Vec<ParamInfo>, return_type: Option<TypeId>) -> Self {
        CallableSignature {
            params,
            return_type,
            is_varargs: false,
            is_builder: false,
        }
    }

    #[must_use]
    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    #[must_use]
    pub fn builder(mut self) -> Self {
        self.is_builder = true;
        self
    }
}

/// Whether a call with `argument_types` may bind to `callable`.
///
/// Unknown argument types make the answer `true`: applicability is only denied
/// on positive evidence.
pub fn is_applicable(
    argument_types: &[Option<TypeId>],
    callable: &CallableSignature,
    compat: &CompatChecker<'_>,
) -> bool {
    if callable.is_builder {
        return true;
    }
    let Some(args) = argument_types.iter().copied().collect::<Option<Vec<TypeId>>>() else {
        return true;
    };

    let result = if callable.is_varargs {
        varargs_applicable(&args, callable, compat)
    } else {
        fixed_applicable(&args, &callable.params, compat)
    };
    trace!(arg_count = args.len(), param_count = callable.params.len(), result, "applicability");
    result
}

fn accepts(param: &ParamInfo, arg: TypeId, compat: &CompatChecker<'_>) -> bool {
    param.ty.is_none_or(|ty| compat.is_assignable(ty, arg))
}

/// `params` with `count` defaulted parameters dropped right to left.
fn drop_optional(params: &[ParamInfo], count: usize) -> Vec<&ParamInfo> {
    let mut to_drop = count;
    let mut kept: Vec<&ParamInfo> = Vec::with_capacity(params.len().saturating_sub(count));
    for param in params.iter().rev() {
        if param.optional && to_drop > 0 {
            to_drop -= 1;
            continue;
        }
        kept.push(param);
    }
    kept.reverse();
    kept
}

fn required_count(params: &[ParamInfo]) -> usize {
    params.iter().filter(|p| !p.optional).count()
}

/// Parameters with defaults are dropped right to left until the counts match.
fn fixed_applicable(args: &[TypeId], params: &[ParamInfo], compat: &CompatChecker<'_>) -> bool {
    if args.len() < required_count(params) || args.len() > params.len() {
        return false;
    }

    drop_optional(params, params.len() - args.len())
        .iter()
        .zip(args)
        .all(|(param, &arg)| accepts(param, arg, compat))
}

/// Tries every split between the fixed parameters (after dropping defaults) and
/// the trailing varargs parameter.
fn varargs_applicable(
    args: &[TypeId],
    callable: &CallableSignature,
    compat: &CompatChecker<'_>,
) -> bool {
    let Some((last, fixed)) = callable.params.split_last() else {
        return args.is_empty();
    };
    let required = required_count(fixed);
    let widest = fixed.len().min(args.len());
    (required..=widest).any(|kept_count| {
        let kept = drop_optional(fixed, fixed.len() - kept_count);
        let fixed_ok = kept
            .iter()
            .zip(args)
            .all(|(param, &arg)| accepts(param, arg, compat));
        fixed_ok && rest_applicable(last, &args[kept_count..], compat)
    })
}

fn rest_applicable(last: &ParamInfo, rest: &[TypeId], compat: &CompatChecker<'_>) -> bool {
    // An array passed in the varargs position binds directly.
    if rest.len() == 1 && accepts(last, rest[0], compat) {
        return true;
    }
    let element = last.ty.and_then(|ty| compat.interner().array_element(ty));
    rest.iter()
        .all(|&arg| element.is_none_or(|element| compat.is_assignable(element, arg)))
}
