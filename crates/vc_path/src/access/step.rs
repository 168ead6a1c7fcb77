use vc_object::ops::element_at;
use vc_object::{MemberKind, StorageError, Value};

use crate::error::AccessErrorKind;
use crate::options::{AccessOptions, MethodCalls};
use crate::resolve::{ResolvedMember, resolve_member};
use crate::token::Token;

/// Reads the value `token` selects from `container`.
pub(crate) fn read_step(
    container: &Value,
    token: &Token<'_>,
    options: AccessOptions,
) -> Result<Value, AccessErrorKind> {
    if container.is_null() {
        return Err(AccessErrorKind::NullIntermediate);
    }
    match token {
        Token::MemberName(name) => read_member(container, name, options),
        &Token::ElementIndex(index) => read_element(container, index),
    }
}

fn read_member(
    container: &Value,
    name: &str,
    options: AccessOptions,
) -> Result<Value, AccessErrorKind> {
    let resolved = resolve_on(container, name)?;
    let member = resolved.member();
    let receiver = (!member.is_static()).then_some(container);

    match member.kind() {
        &MemberKind::Field { slot, .. } if member.is_static() => {
            Ok(resolved.owner().read_static(slot)?)
        }
        &MemberKind::Field { slot, .. } => read_instance_slot(container, slot),
        MemberKind::Property { getter, .. } => Ok(getter(receiver)),
        MemberKind::Method { call } => match options.method_calls {
            MethodCalls::Invoke => Ok(call(receiver)),
            MethodCalls::Deny => Err(AccessErrorKind::MethodCallDenied { name: name.into() }),
        },
    }
}

fn read_instance_slot(container: &Value, slot: usize) -> Result<Value, AccessErrorKind> {
    match container {
        Value::Object(obj) => Ok(obj.read_slot(slot)?),
        Value::Struct(val) => val.slot(slot).cloned().ok_or_else(|| {
            StorageError::SlotOutOfBounds {
                slot,
                len: val.fields().len(),
            }
            .into()
        }),
        _ => Err(StorageError::SlotOutOfBounds { slot, len: 0 }.into()),
    }
}

fn read_element(container: &Value, index: usize) -> Result<Value, AccessErrorKind> {
    let collection = container
        .as_collection()
        .ok_or(AccessErrorKind::NotCollection {
            found: container.kind_name(),
        })?;
    Ok(element_at(collection, index)?)
}

/// Resolves `name` on the runtime type of `container`.
pub(crate) fn resolve_on<'c>(
    container: &'c Value,
    name: &str,
) -> Result<ResolvedMember<'c>, AccessErrorKind> {
    container
        .ty()
        .and_then(|ty| resolve_member(ty, name))
        .ok_or_else(|| AccessErrorKind::MemberNotFound {
            ty: type_name(container).into(),
            name: name.into(),
        })
}

/// The type name of objects and structs, the kind name of anything else.
pub(crate) fn type_name(value: &Value) -> &str {
    value.ty().map_or(value.kind_name(), |ty| ty.name())
}
