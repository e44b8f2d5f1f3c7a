//! Type reconstruction
//!
//! Expands one type table row into the host's concrete types. Step 1 picks
//! the scalar types (the cartesian product for generic types), step 2
//! applies vector width, volatile, const and finally address space and
//! pointer, always in that order.

use crate::catalog::TypeIdKind;
use crate::error::{TableGenError, TableGenResult};
use crate::tables::{BuiltinTables, TypeRow};
use progmodel_decls::AccessQualifier;
use std::fmt;

/// The host type model the tables expand into
pub trait TypeContext {
    type Type: Clone;

    fn concrete(&mut self, name: &str) -> Self::Type;
    fn vector(&mut self, element: Self::Type, width: u32) -> Self::Type;
    fn volatile(&mut self, ty: Self::Type) -> Self::Type;
    fn constant(&mut self, ty: Self::Type) -> Self::Type;
    /// `None` is the default address space
    fn address_space(&mut self, ty: Self::Type, space: Option<&str>) -> Self::Type;
    fn pointer(&mut self, pointee: Self::Type) -> Self::Type;
}

/// Reference host type model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    Named(String),
    Vector(Box<ConcreteType>, u32),
    Volatile(Box<ConcreteType>),
    Const(Box<ConcreteType>),
    AddressSpace(Box<ConcreteType>, String),
    Pointer(Box<ConcreteType>),
}

impl ConcreteType {
    pub fn named(name: &str) -> Self {
        ConcreteType::Named(name.to_string())
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Named(name) => write!(f, "{}", name),
            ConcreteType::Vector(element, width) => write!(f, "vec<{}, {}>", element, width),
            ConcreteType::Volatile(ty) => write!(f, "volatile {}", ty),
            ConcreteType::Const(ty) => write!(f, "const {}", ty),
            ConcreteType::AddressSpace(ty, space) => write!(f, "{} {}", space, ty),
            ConcreteType::Pointer(pointee) => write!(f, "{} *", pointee),
        }
    }
}

/// [`TypeContext`] building [`ConcreteType`] values
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceContext;

impl TypeContext for ReferenceContext {
    type Type = ConcreteType;

    fn concrete(&mut self, name: &str) -> ConcreteType {
        ConcreteType::named(name)
    }

    fn vector(&mut self, element: ConcreteType, width: u32) -> ConcreteType {
        ConcreteType::Vector(Box::new(element), width)
    }

    fn volatile(&mut self, ty: ConcreteType) -> ConcreteType {
        ConcreteType::Volatile(Box::new(ty))
    }

    fn constant(&mut self, ty: ConcreteType) -> ConcreteType {
        ConcreteType::Const(Box::new(ty))
    }

    fn address_space(&mut self, ty: ConcreteType, space: Option<&str>) -> ConcreteType {
        match space {
            Some(space) => ConcreteType::AddressSpace(Box::new(ty), space.to_string()),
            None => ty,
        }
    }

    fn pointer(&mut self, pointee: ConcreteType) -> ConcreteType {
        ConcreteType::Pointer(Box::new(pointee))
    }
}

/// Append the concrete types `row` stands for to `out`.
///
/// Entries already in `out` are left alone.
pub fn expand_type<C: TypeContext>(
    tables: &BuiltinTables,
    ctx: &mut C,
    row: &TypeRow,
    out: &mut Vec<C::Type>,
) -> TableGenResult<()> {
    let start = out.len();
    let entry = tables.type_id(row);

    // Step 1
    let mut generic: Option<(usize, &[u32])> = None;
    match &entry.kind {
        TypeIdKind::Image { variants } => {
            let concrete = variants
                .iter()
                .find(|(access, _)| *access == row.access && *access != AccessQualifier::None)
                .map(|(_, name)| name)
                .ok_or_else(|| TableGenError::image_without_access(&row.def_name, row.span))?;
            out.push(ctx.concrete(concrete));
        }
        TypeIdKind::Generic {
            types,
            vector_sizes,
            ..
        } => {
            let widths = tables.int_lists[vector_sizes.0].values.as_slice();
            for _ in widths {
                for name in types {
                    out.push(ctx.concrete(name));
                }
            }
            generic = Some((types.len(), widths));
        }
        TypeIdKind::Scalar { concrete: Some(name) } => out.push(ctx.concrete(name)),
        TypeIdKind::Scalar { concrete: None } => {}
    }

    // Step 2
    let expanded = &mut out[start..];
    if (row.type_id as usize) >= tables.non_generic_count {
        if let Some((type_count, widths)) = generic {
            for (i, ty) in expanded.iter_mut().enumerate() {
                let width = widths[i / type_count];
                if width != 1 {
                    *ty = ctx.vector(ty.clone(), width);
                }
            }
        }
    } else if row.vector_width > 1 {
        for ty in expanded.iter_mut() {
            *ty = ctx.vector(ty.clone(), row.vector_width);
        }
    }

    if row.is_volatile {
        for ty in expanded.iter_mut() {
            *ty = ctx.volatile(ty.clone());
        }
    }

    if row.is_const {
        for ty in expanded.iter_mut() {
            *ty = ctx.constant(ty.clone());
        }
    }

    // Pointers come last: builtins only take `[const|volatile] T *`
    if row.is_pointer {
        for ty in expanded.iter_mut() {
            let qualified = ctx.address_space(ty.clone(), row.address_space.as_deref());
            *ty = ctx.pointer(qualified);
        }
    }

    Ok(())
}

/// Expand every entry of one overload's signature, return type first
pub fn expand_signature<C: TypeContext>(
    tables: &BuiltinTables,
    ctx: &mut C,
    signature: &[u16],
) -> TableGenResult<Vec<Vec<C::Type>>> {
    signature
        .iter()
        .map(|index| {
            let mut out = Vec::new();
            if let Some(row) = tables.type_row(*index) {
                expand_type(tables, ctx, row, &mut out)?;
            }
            Ok(out)
        })
        .collect()
}
