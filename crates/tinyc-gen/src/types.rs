//! Maps the language's two primitive types onto their LLVM counterparts.
//!
//! `INT` is a 32-bit signed integer, `FLOAT` a 32-bit IEEE-754 float.
//! Neither has a heap representation or a pointer form — there is nothing
//! else to map.

use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;

use tinyc_sem::PrimType;

pub(crate) fn llvm_type<'ctx>(context: &'ctx Context, ty: PrimType) -> BasicTypeEnum<'ctx> {
    match ty {
        PrimType::Int => context.i32_type().into(),
        PrimType::Float => context.f32_type().into(),
    }
}
