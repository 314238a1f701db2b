//! Hook names, typed hook descriptors, and the catalogue of extension points
//! the host fires.
//!
//! The registry and dispatcher work on untyped `serde_json::Value`s. The
//! descriptors here pin a hook name to the value and argument types its
//! callbacks see, converting with serde at the boundary.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dispatcher::HookDispatcher;
use super::registry::{HookRegistry, RegisterOptions, RegistrationHandle};
use crate::error::HookError;

/// Identifier of an extension point, e.g. `"entries.set_slug"`.
///
/// Any non-empty string is a valid name. Names nobody registered against
/// simply have no callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookName(Cow<'static, str>);

impl HookName {
    /// Creates a hook name from a string literal.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub const fn from_static(name: &'static str) -> Self {
        assert!(!name.is_empty(), "hook name must not be empty");
        Self(Cow::Borrowed(name))
    }

    /// Creates a hook name from a runtime string.
    pub fn parse(name: impl Into<String>) -> Result<Self, HookError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HookError::InvalidName {
                reason: "hook name must not be empty".to_string(),
            });
        }
        Ok(Self(Cow::Owned(name)))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HookName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HookName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Extra arguments of a typed hook, as a tuple.
pub trait HookArgs: Sized {
    /// Number of values in the tuple.
    const ARITY: usize;

    /// Converts the tuple into hook arguments.
    fn into_values(self, hook: &HookName) -> Result<Vec<Value>, HookError>;

    /// Rebuilds the tuple from hook arguments.
    ///
    /// `offset` is the position of `values[0]` in the full argument list and
    /// only affects error reporting. Missing trailing values decode from
    /// `null`, so optional arguments may be omitted by the caller.
    fn from_values(hook: &HookName, values: &[Value], offset: usize) -> Result<Self, HookError>;
}

impl HookArgs for () {
    const ARITY: usize = 0;

    fn into_values(self, _hook: &HookName) -> Result<Vec<Value>, HookError> {
        Ok(Vec::new())
    }

    fn from_values(_hook: &HookName, _values: &[Value], _offset: usize) -> Result<Self, HookError> {
        Ok(())
    }
}

macro_rules! impl_hook_args {
    ($arity:expr; $($ty:ident => $idx:tt),+) => {
        impl<$($ty),+> HookArgs for ($($ty,)+)
        where
            $($ty: Serialize + DeserializeOwned),+
        {
            const ARITY: usize = $arity;

            fn into_values(self, hook: &HookName) -> Result<Vec<Value>, HookError> {
                Ok(vec![$(encode(hook, &self.$idx)?),+])
            }

            fn from_values(
                hook: &HookName,
                values: &[Value],
                offset: usize,
            ) -> Result<Self, HookError> {
                Ok(($(
                    decode::<$ty>(
                        hook,
                        offset + $idx,
                        values.get($idx).cloned().unwrap_or(Value::Null),
                    )?,
                )+))
            }
        }
    };
}

impl_hook_args!(1; A => 0);
impl_hook_args!(2; A => 0, B => 1);
impl_hook_args!(3; A => 0, B => 1, C => 2);

pub(crate) fn encode<T: Serialize + ?Sized>(hook: &HookName, value: &T) -> Result<Value, HookError> {
    serde_json::to_value(value).map_err(|source| HookError::Encode {
        hook: hook.to_string(),
        source,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(
    hook: &HookName,
    position: usize,
    value: Value,
) -> Result<T, HookError> {
    serde_json::from_value(value).map_err(|source| HookError::Decode {
        hook: hook.to_string(),
        position,
        source,
    })
}

/// A filter extension point threading a `V` through its callbacks, with
/// extra arguments `A`.
pub struct FilterHook<V, A = ()> {
    name: HookName,
    _types: PhantomData<fn(V, A) -> V>,
}

impl<V, A> FilterHook<V, A> {
    /// Declares a filter hook.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: HookName::from_static(name),
            _types: PhantomData,
        }
    }

    /// Returns the hook name.
    pub fn name(&self) -> &HookName {
        &self.name
    }
}

impl<V, A> FilterHook<V, A>
where
    V: Serialize + DeserializeOwned + 'static,
    A: HookArgs + 'static,
{
    /// Registers a callback receiving the value and every extra argument.
    ///
    /// The accepted-argument count is derived from `A`; any count set on
    /// `options` is overridden.
    pub fn add<F>(
        &self,
        registry: &HookRegistry,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        F: Fn(V, A) -> Result<V, HookError> + Send + Sync + 'static,
    {
        let hook = self.name.clone();
        registry.register(
            self.name.clone(),
            options.with_accepted_args(1 + A::ARITY),
            move |args: Vec<Value>| {
                let mut args = args.into_iter();
                let value = decode::<V>(&hook, 0, args.next().unwrap_or(Value::Null))?;
                let rest: Vec<Value> = args.collect();
                let extra = A::from_values(&hook, &rest, 1)?;
                encode(&hook, &callback(value, extra)?)
            },
        )
    }

    /// Registers a callback that only needs the value.
    pub fn add_value<F>(
        &self,
        registry: &HookRegistry,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        F: Fn(V) -> Result<V, HookError> + Send + Sync + 'static,
    {
        let hook = self.name.clone();
        registry.register(
            self.name.clone(),
            options.with_accepted_args(1),
            move |args: Vec<Value>| {
                let value = args.into_iter().next().unwrap_or(Value::Null);
                let value = decode::<V>(&hook, 0, value)?;
                encode(&hook, &callback(value)?)
            },
        )
    }

    /// Threads `value` through every callback registered on this hook.
    pub fn apply(&self, dispatcher: &HookDispatcher, value: V, args: A) -> Result<V, HookError> {
        if !dispatcher.registry().has_callbacks(&self.name) {
            return Ok(value);
        }
        let initial = encode(&self.name, &value)?;
        let extra = args.into_values(&self.name)?;
        let filtered = dispatcher.apply_filters(&self.name, initial, &extra)?;
        decode(&self.name, 0, filtered)
    }
}

impl<V, A> fmt::Debug for FilterHook<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterHook").field("name", &self.name).finish()
    }
}

/// An action extension point notifying its callbacks with arguments `A`.
pub struct ActionHook<A = ()> {
    name: HookName,
    _types: PhantomData<fn(A)>,
}

impl<A> ActionHook<A> {
    /// Declares an action hook.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: HookName::from_static(name),
            _types: PhantomData,
        }
    }

    /// Returns the hook name.
    pub fn name(&self) -> &HookName {
        &self.name
    }
}

impl<A> ActionHook<A>
where
    A: HookArgs + 'static,
{
    /// Registers a callback receiving every argument.
    pub fn add<F>(
        &self,
        registry: &HookRegistry,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        F: Fn(A) -> Result<(), HookError> + Send + Sync + 'static,
    {
        let hook = self.name.clone();
        registry.register(
            self.name.clone(),
            options.with_accepted_args(A::ARITY),
            move |args: Vec<Value>| {
                callback(A::from_values(&hook, &args, 0)?)?;
                Ok(Value::Null)
            },
        )
    }

    /// Notifies every callback registered on this hook.
    pub fn fire(&self, dispatcher: &HookDispatcher, args: A) -> Result<(), HookError> {
        if !dispatcher.registry().has_callbacks(&self.name) {
            return Ok(());
        }
        let args = args.into_values(&self.name)?;
        dispatcher.do_action(&self.name, &args)
    }
}

impl<A> fmt::Debug for ActionHook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHook").field("name", &self.name).finish()
    }
}

/// Extension points fired while an entry is saved.
pub mod entries {
    use std::collections::BTreeMap;

    use quire_core::types::{EntrySnapshot, EntryTypeDescriptor};

    use super::{ActionHook, FilterHook};

    /// Registered content types, keyed by type name.
    ///
    /// Callbacks receive the accumulated map, add or overwrite entries, and
    /// return it.
    pub const REGISTERED_TYPES: FilterHook<BTreeMap<String, EntryTypeDescriptor>> =
        FilterHook::new("entries.registered_types");

    /// Display name of the entry being saved.
    pub const SET_NAME: FilterHook<String, (EntrySnapshot,)> = FilterHook::new("entries.set_name");

    /// Slug override for the entry being saved.
    ///
    /// Dispatch starts from `None`. A non-empty `Some` result replaces the
    /// host's own slug derivation; `None` and `Some("")` both leave the slug
    /// to the host. Callbacks that have nothing to say must return their
    /// input unchanged.
    pub const SET_SLUG: FilterHook<Option<String>, (EntrySnapshot,)> =
        FilterHook::new("entries.set_slug");

    /// Fired after an entry has been persisted.
    pub const SAVED: ActionHook<(EntrySnapshot,)> = ActionHook::new("entries.saved");
}
