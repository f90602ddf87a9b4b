//! Object formatter registry
//!
//! Formatters are keyed by [`TypeId`]. Lookup tries the value's exact type
//! first and then walks the declared supertypes breadth-first, so the nearest
//! registered ancestor wins. A bare `String` or `&str` is logged as is. Any
//! other value with no matching formatter falls back to its `Debug` rendering,
//! so sequences and maps come out comma-joined in brackets or braces with
//! string elements quoted: `["a", "b"]`, `{"k": 1}`. Register a formatter for
//! the collection type to log its elements unquoted.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::SystemTime;

/// Formats a value of type `T`.
pub trait ObjectFormatter<T: ?Sized>: Send + Sync {
    fn format(&self, value: &T) -> String;
}

impl<T, F> ObjectFormatter<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> String + Send + Sync,
{
    fn format(&self, value: &T) -> String {
        self(value)
    }
}

trait ErasedObjectFormatter: Send + Sync {
    fn format_any(&self, value: &dyn Any) -> Option<String>;
}

struct Typed<T, F> {
    formatter: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> ErasedObjectFormatter for Typed<T, F>
where
    T: Any,
    F: ObjectFormatter<T>,
{
    fn format_any(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(|v| self.formatter.format(v))
    }
}

/// Edge from a type to one of its declared supertypes.
trait Upcast: Send + Sync {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any>;
}

struct UpcastFn<C, P> {
    f: fn(&C) -> &P,
}

impl<C: Any, P: Any> Upcast for UpcastFn<C, P> {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        value.downcast_ref::<C>().map(|child| (self.f)(child) as &dyn Any)
    }
}

/// Type-keyed registry of object formatters.
#[derive(Clone, Default)]
pub struct ObjectFormatterRegistry {
    formatters: HashMap<TypeId, Arc<dyn ErasedObjectFormatter>>,
    supertypes: HashMap<TypeId, Vec<Arc<dyn Upcast>>>,
}

impl ObjectFormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in formatters (`SystemTime`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<SystemTime, _>(format_system_time);
        registry
    }

    /// Register `formatter` for values of exactly type `T`, replacing any
    /// previous formatter for `T`.
    pub fn register<T, F>(&mut self, formatter: F)
    where
        T: Any,
        F: ObjectFormatter<T> + 'static,
    {
        self.formatters.insert(
            TypeId::of::<T>(),
            Arc::new(Typed {
                formatter,
                _marker: PhantomData,
            }),
        );
    }

    /// Declare that `C` may be viewed as `P` for formatter lookup.
    pub fn declare_supertype<C: Any, P: Any>(&mut self, upcast: fn(&C) -> &P) {
        self.supertypes
            .entry(TypeId::of::<C>())
            .or_default()
            .push(Arc::new(UpcastFn { f: upcast }));
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.formatters.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Format with the most specific registered formatter, if any.
    pub fn find(&self, value: &dyn Any) -> Option<String> {
        let mut queue: VecDeque<&dyn Any> = VecDeque::from([value]);
        let mut visited: HashSet<TypeId> = HashSet::new();

        while let Some(current) = queue.pop_front() {
            let type_id = Any::type_id(current);
            if !visited.insert(type_id) {
                continue;
            }
            if let Some(formatter) = self.formatters.get(&type_id) {
                if let Some(out) = formatter.format_any(current) {
                    return Some(out);
                }
            }
            if let Some(parents) = self.supertypes.get(&type_id) {
                queue.extend(parents.iter().filter_map(|edge| edge.upcast(current)));
            }
        }
        None
    }

    /// Format `value`, falling back to its default rendering.
    pub fn format<T: Any + Debug>(&self, value: &T) -> String {
        if let Some(out) = self.find(value) {
            return out;
        }
        let any: &dyn Any = value;
        if let Some(s) = any.downcast_ref::<String>() {
            return s.clone();
        }
        if let Some(s) = any.downcast_ref::<&'static str>() {
            return (*s).to_string();
        }
        format!("{:?}", value)
    }
}

impl std::fmt::Debug for ObjectFormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFormatterRegistry")
            .field("formatters", &self.formatters.len())
            .field("supertypes", &self.supertypes.len())
            .finish()
    }
}

fn format_system_time(time: &SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(*time)
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}
