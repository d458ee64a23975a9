//! Accessor annotation loading.
//!
//! Walks Rust struct declarations with `syn` and turns every field carrying
//! an `#[accessor]` attribute into a [`FieldDescriptor`].
//!
//! ```ignore
//! #[accessor(lock = "mu")]
//! struct DeliveryTiming {
//!     mu: Mutex<()>,
//!     #[accessor]
//!     time_transition: i32,
//!     #[accessor(getter = "number_of_days", setter)]
//!     number: Option<i64>,
//!     #[accessor(getter, sample = "Some(Duration::from_secs(60))")]
//!     delay: Option<Duration>,
//!     untouched: bool,
//! }
//! ```

use crate::descriptor::{Accessor, FieldDescriptor, TypeCategory, TypeDescriptor};
use crate::error::LoadError;
use quote::ToTokens;
use std::collections::{HashMap, HashSet};
use syn::{
    Attribute, DeriveInput, Fields, GenericArgument, Generics, Ident, Item, ItemStruct, LitStr,
    PathArguments, Type, TypeParamBound, TypeTraitObject,
};

/// Attribute name recognized on types and fields.
pub const ACCESSOR_ATTRIBUTE: &str = "accessor";

/// Loads type descriptors from Rust declarations.
///
/// The loader keeps the `type` aliases and structs of the parsed source so
/// field types can be resolved through local aliases.
#[derive(Debug, Default)]
pub struct TypeLoader {
    aliases: HashMap<String, Type>,
    structs: Vec<ItemStruct>,
}

/// Options parsed from one `#[accessor(...)]` attribute list.
#[derive(Debug, Default)]
struct AccessorOptions {
    getter: Option<Accessor>,
    setter: Option<Accessor>,
    lock: Option<String>,
    sample: Option<String>,
}

impl TypeLoader {
    /// Creates a loader with no source context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses Rust source text and collects its aliases and structs.
    ///
    /// # Errors
    /// Returns `LoadError::Syn` if the source is not valid Rust.
    pub fn from_source(source: &str) -> Result<Self, LoadError> {
        let file = syn::parse_file(source)?;
        Ok(Self::from_items(&file.items))
    }

    /// Collects aliases and structs from parsed items, descending into
    /// inline modules.
    #[must_use]
    pub fn from_items(items: &[Item]) -> Self {
        let mut loader = Self::new();
        loader.collect(items);
        loader
    }

    fn collect(&mut self, items: &[Item]) {
        for item in items {
            match item {
                Item::Type(alias) if alias.generics.params.is_empty() => {
                    self.aliases
                        .insert(alias.ident.to_string(), (*alias.ty).clone());
                }
                Item::Struct(item_struct) => self.structs.push(item_struct.clone()),
                Item::Mod(module) => {
                    if let Some((_, nested)) = &module.content {
                        self.collect(nested);
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns the names of structs with at least one annotated field, in
    /// declaration order.
    #[must_use]
    pub fn annotated_types(&self) -> Vec<String> {
        self.structs
            .iter()
            .filter(|s| s.fields.iter().any(|f| has_accessor_attr(&f.attrs)))
            .map(|s| s.ident.to_string())
            .collect()
    }

    /// Loads the descriptor of a struct declared in the parsed source.
    ///
    /// # Errors
    /// Returns `LoadError` if the type is missing, has an unsupported shape,
    /// or carries a malformed annotation.
    pub fn load(&self, type_name: &str) -> Result<TypeDescriptor, LoadError> {
        let item = self
            .structs
            .iter()
            .find(|s| s.ident == type_name)
            .ok_or_else(|| LoadError::TypeNotFound {
                name: type_name.to_string(),
            })?;

        self.load_parts(&item.ident, &item.attrs, &item.generics, &item.fields)
    }

    /// Loads the descriptor of a derive input.
    ///
    /// # Errors
    /// Returns `LoadError` if the input is not a struct with named fields or
    /// carries a malformed annotation.
    pub fn load_derive(&self, input: &DeriveInput) -> Result<TypeDescriptor, LoadError> {
        match &input.data {
            syn::Data::Struct(data) => {
                self.load_parts(&input.ident, &input.attrs, &input.generics, &data.fields)
            }
            _ => Err(LoadError::unsupported(
                input.ident.to_string(),
                "accessors can only be generated for structs",
            )),
        }
    }

    fn load_parts(
        &self,
        ident: &Ident,
        attrs: &[Attribute],
        generics: &Generics,
        fields: &Fields,
    ) -> Result<TypeDescriptor, LoadError> {
        let name = ident.to_string();

        if !generics.params.is_empty() {
            return Err(LoadError::unsupported(
                &name,
                "generic parameters are not supported",
            ));
        }
        let Fields::Named(named) = fields else {
            return Err(LoadError::unsupported(
                &name,
                "only structs with named fields are supported",
            ));
        };

        let type_options = parse_type_options(&name, attrs)?;
        let field_names: HashSet<String> = named
            .named
            .iter()
            .filter_map(|f| f.ident.as_ref().map(ToString::to_string))
            .collect();

        let check_lock = |lock: &String| {
            if field_names.contains(lock) {
                Ok(())
            } else {
                Err(LoadError::UnknownLockField {
                    type_name: name.clone(),
                    lock: lock.clone(),
                })
            }
        };

        if let Some(lock) = &type_options.lock {
            check_lock(lock)?;
        }

        let mut descriptors = Vec::new();
        for field in &named.named {
            let Some(field_ident) = &field.ident else {
                continue;
            };
            let owner = format!("{name}.{field_ident}");
            let Some(options) = parse_field_options(&owner, &field.attrs)? else {
                continue;
            };

            let lock = options.lock.or_else(|| type_options.lock.clone());
            if let Some(lock) = &lock {
                check_lock(lock)?;
            }

            let (category, nullable) = self.categorize(&field.ty);
            let (getter, setter) = match (options.getter, options.setter) {
                (None, None) => (Accessor::Default, Accessor::Default),
                (getter, setter) => (getter.unwrap_or_default(), setter.unwrap_or_default()),
            };

            descriptors.push(FieldDescriptor {
                name: field_ident.to_string(),
                type_text: tidy_tokens(&field.ty.to_token_stream().to_string()),
                category,
                nullable,
                getter,
                setter,
                lock,
                sample: options.sample,
            });
        }

        tracing::debug!(
            type_name = %name,
            fields = descriptors.len(),
            "loaded accessor descriptors"
        );

        Ok(TypeDescriptor {
            name,
            lock: type_options.lock,
            fields: descriptors,
        })
    }

    /// Maps a declared type to its category and whether it is `Option<_>`.
    ///
    /// An optional type keeps the category of its inner type when that is
    /// nil-like and is otherwise a pointer: `Option<Vec<u8>>` is a slice,
    /// `Option<u32>` is a pointer.
    #[must_use]
    pub fn categorize(&self, ty: &Type) -> (TypeCategory, bool) {
        let mut visiting = Vec::new();
        match option_inner(ty) {
            Some(inner) => {
                let category = self.category_of(inner, &mut visiting);
                if category.is_nil_like() {
                    (category, true)
                } else {
                    (TypeCategory::Pointer, true)
                }
            }
            None => (self.category_of(ty, &mut visiting), false),
        }
    }

    fn category_of(&self, ty: &Type, visiting: &mut Vec<String>) -> TypeCategory {
        match ty {
            Type::Paren(paren) => self.category_of(&paren.elem, visiting),
            Type::Group(group) => self.category_of(&group.elem, visiting),
            Type::Array(_) => TypeCategory::Array,
            Type::Slice(_) => TypeCategory::Slice,
            Type::Ptr(_) => TypeCategory::Pointer,
            Type::BareFn(_) => TypeCategory::Function,
            Type::TraitObject(object) => trait_object_category(object),
            Type::Reference(reference) => match &*reference.elem {
                Type::Slice(_) => TypeCategory::Slice,
                Type::Path(path) if path.path.is_ident("str") => {
                    TypeCategory::String { owned: false }
                }
                Type::TraitObject(object) => trait_object_category(object),
                _ => TypeCategory::Pointer,
            },
            Type::Path(type_path) if type_path.qself.is_none() => {
                self.path_category(ty, &type_path.path, visiting)
            }
            _ => TypeCategory::Unsupported,
        }
    }

    fn path_category(
        &self,
        ty: &Type,
        path: &syn::Path,
        visiting: &mut Vec<String>,
    ) -> TypeCategory {
        let Some(last) = path.segments.last() else {
            return TypeCategory::Unsupported;
        };
        let ident = last.ident.to_string();

        if path.segments.len() == 1 {
            if let Some(target) = self.aliases.get(&ident) {
                if visiting.contains(&ident) {
                    return TypeCategory::Unsupported;
                }
                visiting.push(ident.clone());
                let underlying = self.category_of(target, visiting);
                visiting.pop();
                return TypeCategory::Named {
                    name: ident,
                    underlying: Box::new(underlying),
                };
            }
        }

        match ident.as_str() {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => TypeCategory::Numeric { float: false },
            "f32" | "f64" => TypeCategory::Numeric { float: true },
            "bool" => TypeCategory::Boolean,
            "String" => TypeCategory::String { owned: true },
            "Box" | "Rc" | "Arc" => match first_type_argument(last) {
                Some(Type::TraitObject(object)) => trait_object_category(object),
                _ => TypeCategory::Pointer,
            },
            "Option" => TypeCategory::Pointer,
            "Vec" | "VecDeque" => TypeCategory::Slice,
            "HashMap" | "BTreeMap" | "HashSet" | "BTreeSet" => TypeCategory::Map,
            "Sender" | "SyncSender" | "Receiver" | "UnboundedSender" | "UnboundedReceiver" => {
                TypeCategory::Channel
            }
            _ => TypeCategory::Struct {
                type_name: tidy_tokens(&ty.to_token_stream().to_string()),
            },
        }
    }
}

fn has_accessor_attr(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident(ACCESSOR_ATTRIBUTE))
}

fn parse_type_options(owner: &str, attrs: &[Attribute]) -> Result<AccessorOptions, LoadError> {
    let mut options = AccessorOptions::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident(ACCESSOR_ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("lock") {
                if options.lock.is_some() {
                    return Err(meta.error("duplicate `lock` option"));
                }
                let value: LitStr = meta.value()?.parse()?;
                options.lock = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("only `lock = \"field\"` is accepted on a type"))
            }
        })
        .map_err(|source| LoadError::InvalidAnnotation {
            owner: owner.to_string(),
            source,
        })?;
    }

    Ok(options)
}

/// Parses the field's accessor attribute, or `None` when it has none.
fn parse_field_options(
    owner: &str,
    attrs: &[Attribute],
) -> Result<Option<AccessorOptions>, LoadError> {
    let mut found = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident(ACCESSOR_ATTRIBUTE)) {
        let options: &mut AccessorOptions = found.get_or_insert_with(AccessorOptions::default);

        // Bare `#[accessor]`
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();

            match key.as_str() {
                "getter" | "setter" => {
                    let slot = if key == "getter" {
                        &mut options.getter
                    } else {
                        &mut options.setter
                    };
                    if slot.is_some() {
                        return Err(meta.error(format!("duplicate `{key}` option")));
                    }
                    *slot = Some(if meta.input.peek(syn::Token![=]) {
                        let name: LitStr = meta.value()?.parse()?;
                        let name = name.value();
                        if syn::parse_str::<Ident>(&name).is_err() {
                            return Err(meta.error(format!("`{name}` is not a valid method name")));
                        }
                        Accessor::Custom(name)
                    } else {
                        Accessor::Default
                    });
                    Ok(())
                }
                "lock" | "sample" => {
                    let slot = if key == "lock" {
                        &mut options.lock
                    } else {
                        &mut options.sample
                    };
                    if slot.is_some() {
                        return Err(meta.error(format!("duplicate `{key}` option")));
                    }
                    let value: LitStr = meta.value()?.parse()?;
                    *slot = Some(value.value());
                    Ok(())
                }
                _ => Err(meta.error("expected `getter`, `setter`, `lock` or `sample`")),
            }
        })
        .map_err(|source| LoadError::InvalidAnnotation {
            owner: owner.to_string(),
            source,
        })?;
    }

    Ok(found)
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let last = type_path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    first_type_argument(last)
}

fn first_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn trait_object_category(object: &TypeTraitObject) -> TypeCategory {
    let is_closure = object.bounds.iter().any(|bound| match bound {
        TypeParamBound::Trait(trait_bound) => trait_bound
            .path
            .segments
            .last()
            .is_some_and(|s| s.ident == "Fn" || s.ident == "FnMut" || s.ident == "FnOnce"),
        _ => false,
    });

    if is_closure {
        TypeCategory::Function
    } else {
        TypeCategory::Interface
    }
}

/// Collapses the token spacing of `proc_macro2` output into conventional
/// type syntax: `Option < Vec < u8 > >` becomes `Option<Vec<u8>>`.
#[must_use]
pub fn tidy_tokens(tokens: &str) -> String {
    let mut text = tokens
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace(" ;", ";")
        .replace("& ", "&")
        .replace("* const", "*const")
        .replace("* mut", "*mut");

    if let Some(stripped) = text.strip_prefix(" ") {
        text = stripped.to_string();
    }
    text
}
