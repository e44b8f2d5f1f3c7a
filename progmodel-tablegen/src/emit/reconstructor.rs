// expand_type: from a type table row back to host types

use super::{concrete_variant, int_list_constant, type_id_variant};
use crate::catalog::TypeIdKind;
use crate::tables::BuiltinTables;
use progmodel_decls::AccessQualifier;
use std::fmt::{self, Write};

pub(super) fn emit(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    let has_generics = tables.non_generic_count < tables.type_ids.len();

    out.push_str(
        r#"
    /// Convert a type table row to host types, appended to `out`.
    ///
    /// Generic types stand for several types. Step 1 pushes the scalar
    /// types (the cartesian product of vector sizes and types for generic
    /// types); step 2 applies vector sizes and qualifiers.
    pub fn expand_type<C: TypeContext>(ctx: &mut C, ty: &ProgModelType, out: &mut Vec<C::Type>) {
"#,
    );

    for list in &tables.int_lists {
        let values: Vec<String> = list.values.iter().map(u32::to_string).collect();
        writeln!(
            out,
            "        const {}: &[u32] = &[{}];",
            int_list_constant(&list.name),
            values.join(", ")
        )?;
    }
    writeln!(out)?;
    writeln!(out, "        let start = out.len();")?;
    if has_generics {
        writeln!(out, "        // Number of scalar types in the generic type.")?;
        writeln!(out, "        let mut gen_type_num_types: usize = 1;")?;
        writeln!(out, "        // Vector sizes of the generic type.")?;
        writeln!(out, "        let mut gen_vector_sizes: &[u32] = &[1];")?;
    }

    emit_step_one(out, tables)?;
    emit_step_two(out, tables, has_generics)?;

    writeln!(out, "    }}")
}

fn emit_step_one(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "        match ty.id {{")?;

    for entry in &tables.type_ids {
        let variant = type_id_variant(&entry.name);
        match &entry.kind {
            TypeIdKind::Image { variants } => {
                writeln!(out, "            TypeId::{} => match ty.access_qualifier {{", variant)?;
                writeln!(
                    out,
                    "                AccessQual::None => unreachable!(\"image without access qualifier\"),"
                )?;
                for (access, concrete) in variants {
                    writeln!(
                        out,
                        "                AccessQual::{} => out.push(ctx.concrete(ConcreteType::{})),",
                        access.variant_name(),
                        concrete_variant(concrete)
                    )?;
                }
                // Variants only exist for declared access qualifiers
                let declared = variants.len() + 1;
                if declared < AccessQualifier::ALL.len() {
                    writeln!(
                        out,
                        "                _ => unreachable!(\"{} has no variant for this access qualifier\"),",
                        entry.name
                    )?;
                }
                writeln!(out, "            }},")?;
            }
            TypeIdKind::Generic {
                types,
                vector_sizes,
                ..
            } => {
                let list = &tables.int_lists[vector_sizes.0];
                writeln!(out, "            TypeId::{} => {{", variant)?;
                writeln!(out, "                for _ in {} {{", int_list_constant(&list.name))?;
                for concrete in types {
                    writeln!(
                        out,
                        "                    out.push(ctx.concrete(ConcreteType::{}));",
                        concrete_variant(concrete)
                    )?;
                }
                writeln!(out, "                }}")?;
                writeln!(out, "                gen_type_num_types = {};", types.len())?;
                writeln!(out, "                gen_vector_sizes = {};", int_list_constant(&list.name))?;
                writeln!(out, "            }}")?;
            }
            TypeIdKind::Scalar {
                concrete: Some(concrete),
            } => {
                writeln!(
                    out,
                    "            TypeId::{} => out.push(ctx.concrete(ConcreteType::{})),",
                    variant,
                    concrete_variant(concrete)
                )?;
            }
            TypeIdKind::Scalar { concrete: None } => {}
        }
    }

    writeln!(out, "            // Abstract types have no host type.")?;
    writeln!(out, "            _ => {{}}")?;
    writeln!(out, "        }}")
}

fn emit_step_two(out: &mut String, tables: &BuiltinTables, has_generics: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "        let expanded = &mut out[start..];")?;

    let vector_width = r#"if ty.vector_width > 1 {
            for entry in expanded.iter_mut() {
                *entry = ctx.vector(entry.clone(), ty.vector_width);
            }
        }"#;

    if has_generics {
        writeln!(out, "        // Construct the vector types of generic types.")?;
        writeln!(out, "        if ty.id as u16 >= {} {{", tables.non_generic_count)?;
        out.push_str(
            r#"            for (i, entry) in expanded.iter_mut().enumerate() {
                // For scalars the size is 1.
                let width = gen_vector_sizes[i / gen_type_num_types];
                if width != 1 {
                    *entry = ctx.vector(entry.clone(), width);
                }
            }
"#,
        );
        writeln!(out, "        }} else {}", vector_width)?;
    } else {
        writeln!(out, "        {}", vector_width)?;
    }

    writeln!(
        out,
        "{}",
        r#"
        if ty.is_volatile {
            for entry in expanded.iter_mut() {
                *entry = ctx.volatile(entry.clone());
            }
        }

        if ty.is_const {
            for entry in expanded.iter_mut() {
                *entry = ctx.constant(entry.clone());
            }
        }

        // Pointers come last: builtins only take `[const|volatile] T *`.
        if ty.is_pointer {
            for entry in expanded.iter_mut() {
                let qualified = ctx.address_space(entry.clone(), ty.address_space);
                *entry = ctx.pointer(qualified);
            }
        }"#
    )?;

    Ok(())
}
