//! The code generator: a post-order visitor over [`tinyc_sem::Unit`] that
//! drives an inkwell [`Builder`] to emit one LLVM IR function per source
//! `FunctionDecl`.
//!
//! Two maps carry state across the visit: `functions` (`FuncId` → the
//! emitted [`FunctionValue`], so later functions can call earlier ones)
//! and `values` (`VarId` → the most recently bound SSA value for that
//! declaration — locals and parameters are pure SSA values here, never
//! `alloca` stack slots). A `stack` carries intermediate expression
//! results bottom-up, mirroring the reference implementation's explicit
//! value stack rather than returning values up the call chain.
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum, FunctionValue, IntValue};
use inkwell::{FloatPredicate, IntPredicate};

use tinyc_sem::{BinOpKind, Expr, ExprKind, FuncId, FunctionDecl, PrimType, Stmt, Unit, VarId};
use tinyc_util::FxHashMap;

use crate::error::{CodeGenError, Result};
use crate::types::llvm_type;

/// Emits `unit` as a fresh LLVM module named `module_name`.
pub fn generate<'ctx>(
    context: &'ctx Context,
    unit: &Unit,
    module_name: &str,
) -> Result<Module<'ctx>> {
    let module = context.create_module(module_name);
    let mut gen = CodeGen {
        context,
        builder: context.create_builder(),
        functions: FxHashMap::default(),
        values: FxHashMap::default(),
        stack: Vec::new(),
    };
    for (id, decl) in unit.functions() {
        gen.emit_function(&module, unit, id, decl)?;
    }
    Ok(module)
}

struct CodeGen<'ctx> {
    context: &'ctx Context,
    builder: inkwell::builder::Builder<'ctx>,
    functions: FxHashMap<FuncId, FunctionValue<'ctx>>,
    values: FxHashMap<VarId, BasicValueEnum<'ctx>>,
    stack: Vec<BasicValueEnum<'ctx>>,
}

impl<'ctx> CodeGen<'ctx> {
    fn emit_function(
        &mut self,
        module: &Module<'ctx>,
        unit: &Unit,
        id: FuncId,
        decl: &FunctionDecl,
    ) -> Result<()> {
        let ret_ty = llvm_type(self.context, decl.ret);
        let param_tys: Vec<_> = decl
            .params
            .iter()
            .map(|&p| llvm_type(self.context, unit.vars[p].ty).into())
            .collect();
        let fn_ty = ret_ty.fn_type(&param_tys, false);
        let function = module.add_function(decl.name.as_str(), fn_ty, Some(Linkage::Internal));

        for (i, &param_id) in decl.params.iter().enumerate() {
            let param = function.get_nth_param(i as u32).expect("param count matches signature");
            param.set_name(unit.vars[param_id].name.as_str());
            self.values.insert(param_id, param);
        }
        self.functions.insert(id, function);

        let entry = self.context.append_basic_block(function, "function_body");
        self.builder.position_at_end(entry);
        self.emit_stmt(unit, function, &decl.body)?;

        if !function.verify(false) {
            return Err(CodeGenError::VerificationFailed(decl.name.as_str().to_string()));
        }
        Ok(())
    }

    fn pop(&mut self) -> BasicValueEnum<'ctx> {
        self.stack.pop().expect("expression visit always pushes exactly one value")
    }

    fn builder_err(e: impl std::fmt::Display) -> CodeGenError {
        CodeGenError::Builder(e.to_string())
    }

    /// Computes the (documented, unused) zero-comparison and returns the
    /// value actually branched on.
    ///
    /// `if`/`while`/`for` compute an `fcmp one`/`icmp ne` against zero but
    /// then branch on the raw, uncompared operand — the compare result is
    /// dead. inkwell's `build_conditional_branch` requires an `IntValue`,
    /// so a float condition is bitcast to `i32` first rather than
    /// compared; this reproduces the bit-wise-reinterpreted branch in a
    /// type-checked way instead of silently promoting it to the correct
    /// `fcmp`-driven branch.
    fn branch_operand(&mut self, cond: BasicValueEnum<'ctx>) -> Result<IntValue<'ctx>> {
        match cond {
            BasicValueEnum::IntValue(v) => {
                let zero = v.get_type().const_zero();
                self.builder
                    .build_int_compare(IntPredicate::NE, v, zero, "cmp_dead")
                    .map_err(Self::builder_err)?;
                Ok(v)
            },
            BasicValueEnum::FloatValue(v) => {
                let zero = v.get_type().const_zero();
                self.builder
                    .build_float_compare(FloatPredicate::ONE, v, zero, "fcmp_dead")
                    .map_err(Self::builder_err)?;
                let bits = self
                    .builder
                    .build_bit_cast(v, self.context.i32_type(), "cond_bits")
                    .map_err(Self::builder_err)?;
                Ok(bits.into_int_value())
            },
            _ => unreachable!("a condition expression is always int- or float-typed"),
        }
    }

    /// `Binary` always emits integer opcodes, even for `float` operands.
    /// A float operand is bitcast to `i32` first so the
    /// integer opcode has a value to operate on at all; the result is the
    /// bit pattern the source's always-integer lowering would have
    /// produced, not a meaningful float arithmetic result.
    fn int_operand(&mut self, v: BasicValueEnum<'ctx>) -> Result<IntValue<'ctx>> {
        match v {
            BasicValueEnum::IntValue(v) => Ok(v),
            BasicValueEnum::FloatValue(v) => {
                let bits = self
                    .builder
                    .build_bit_cast(v, self.context.i32_type(), "int_bits")
                    .map_err(Self::builder_err)?;
                Ok(bits.into_int_value())
            },
            _ => unreachable!("a binary operand is always int- or float-typed"),
        }
    }

    fn emit_stmt(&mut self, unit: &Unit, function: FunctionValue<'ctx>, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::VariableDecl(var) => {
                let init = unit.vars[*var]
                    .init
                    .as_ref()
                    .expect("sema guarantees every VariableDecl has an initializer");
                self.emit_expr(unit, function, init)?;
                let value = self.pop();
                self.values.insert(*var, value);
                Ok(())
            },
            Stmt::ExpressionStmt(expr) => {
                self.emit_expr(unit, function, expr)?;
                self.pop();
                Ok(())
            },
            Stmt::Return(expr) => {
                self.emit_expr(unit, function, expr)?;
                let value = self.pop();
                self.builder.build_return(Some(&value)).map_err(Self::builder_err)?;
                Ok(())
            },
            Stmt::If { cond, body } => self.emit_if(unit, function, cond, body),
            Stmt::While { cond, body } => self.emit_while(unit, function, cond, body),
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => self.emit_for(unit, function, init, cond, step, body),
            Stmt::Compound(stmts) => {
                for s in stmts {
                    self.emit_stmt(unit, function, s)?;
                }
                Ok(())
            },
        }
    }

    fn emit_if(
        &mut self,
        unit: &Unit,
        function: FunctionValue<'ctx>,
        cond: &Expr,
        body: &Stmt,
    ) -> Result<()> {
        self.emit_expr(unit, function, cond)?;
        let cond_value = self.pop();
        let operand = self.branch_operand(cond_value)?;

        let then_block = self.context.append_basic_block(function, "then");
        let merge_block = self.context.append_basic_block(function, "merge");
        self.builder
            .build_conditional_branch(operand, then_block, merge_block)
            .map_err(Self::builder_err)?;

        self.builder.position_at_end(then_block);
        self.emit_stmt(unit, function, body)?;
        self.builder.build_unconditional_branch(merge_block).map_err(Self::builder_err)?;

        self.builder.position_at_end(merge_block);
        Ok(())
    }

    /// The condition is visited once, before `loop`, and never again — the
    /// back-edge jumps straight to the branch on that stale value; a
    /// corrected lowering would re-evaluate the condition inside `loop`.
    fn emit_while(
        &mut self,
        unit: &Unit,
        function: FunctionValue<'ctx>,
        cond: &Expr,
        body: &Stmt,
    ) -> Result<()> {
        self.emit_expr(unit, function, cond)?;
        let cond_value = self.pop();
        let operand = self.branch_operand(cond_value)?;

        let loop_block = self.context.append_basic_block(function, "loop");
        self.builder.build_unconditional_branch(loop_block).map_err(Self::builder_err)?;
        self.builder.position_at_end(loop_block);

        let then_block = self.context.append_basic_block(function, "then");
        let else_block = self.context.append_basic_block(function, "else");
        self.builder
            .build_conditional_branch(operand, then_block, else_block)
            .map_err(Self::builder_err)?;

        self.builder.position_at_end(then_block);
        self.emit_stmt(unit, function, body)?;
        self.builder.build_unconditional_branch(loop_block).map_err(Self::builder_err)?;

        self.builder.position_at_end(else_block);
        Ok(())
    }

    fn emit_for(
        &mut self,
        unit: &Unit,
        function: FunctionValue<'ctx>,
        init: &Expr,
        cond: &Expr,
        step: &Expr,
        body: &Stmt,
    ) -> Result<()> {
        self.emit_expr(unit, function, init)?;
        self.pop();

        self.emit_expr(unit, function, cond)?;
        let cond_value = self.pop();
        let operand = self.branch_operand(cond_value)?;

        let for_loop_block = self.context.append_basic_block(function, "for_loop");
        self.builder.build_unconditional_branch(for_loop_block).map_err(Self::builder_err)?;
        self.builder.position_at_end(for_loop_block);

        let then_block = self.context.append_basic_block(function, "then");
        let else_block = self.context.append_basic_block(function, "else");
        self.builder
            .build_conditional_branch(operand, then_block, else_block)
            .map_err(Self::builder_err)?;

        self.builder.position_at_end(then_block);
        self.emit_stmt(unit, function, body)?;
        self.emit_expr(unit, function, step)?;
        self.pop();
        self.builder.build_unconditional_branch(for_loop_block).map_err(Self::builder_err)?;

        self.builder.position_at_end(else_block);
        Ok(())
    }

    fn emit_expr(&mut self, unit: &Unit, function: FunctionValue<'ctx>, expr: &Expr) -> Result<()> {
        let value = match &expr.kind {
            ExprKind::IntLiteral(v) => self.context.i32_type().const_int(*v as u64, true).into(),
            ExprKind::FloatLiteral(v) => self.context.f32_type().const_float(*v).into(),
            ExprKind::Variable(var) => *self
                .values
                .get(var)
                .expect("sema guarantees a variable is declared before it is referenced"),
            ExprKind::Assignment { var, value } => {
                self.emit_expr(unit, function, value)?;
                // Peek, don't pop: the assignment's value is also its result.
                let v = *self.stack.last().expect("value expression just pushed a result");
                self.values.insert(*var, v);
                v
            },
            ExprKind::Call { func, args } => {
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    self.emit_expr(unit, function, arg)?;
                    arg_values.push(self.pop());
                }
                let metadata_args: Vec<BasicMetadataValueEnum> =
                    arg_values.iter().map(|&v| v.into()).collect();
                let callee = *self.functions.get(func).expect(
                    "sema guarantees a callee is fully declared before any call to it is parsed",
                );
                let call = self.builder.build_call(callee, &metadata_args, "call_tmp").map_err(Self::builder_err)?;
                call.try_as_basic_value()
                    .left()
                    .expect("every function in this language returns a value")
            },
            ExprKind::Binary { op, lhs, rhs } => {
                self.emit_expr(unit, function, lhs)?;
                let l = self.pop();
                self.emit_expr(unit, function, rhs)?;
                let r = self.pop();
                let l = self.int_operand(l)?;
                let r = self.int_operand(r)?;
                match op {
                    BinOpKind::Plus => self.builder.build_int_add(l, r, "add_tmp"),
                    BinOpKind::Minus => self.builder.build_int_sub(l, r, "sub_tmp"),
                    BinOpKind::Multiply => self.builder.build_int_mul(l, r, "mul_tmp"),
                    BinOpKind::Divide => self.builder.build_int_signed_div(l, r, "div_tmp"),
                }
                .map_err(Self::builder_err)?
                .into()
            },
            ExprKind::Cast { target, inner } => {
                self.emit_expr(unit, function, inner)?;
                let v = self.pop();
                match target {
                    PrimType::Int => self
                        .builder
                        .build_float_to_signed_int(v.into_float_value(), self.context.i32_type(), "fptosi")
                        .map_err(Self::builder_err)?
                        .into(),
                    PrimType::Float => self
                        .builder
                        .build_signed_int_to_float(v.into_int_value(), self.context.f32_type(), "sitofp")
                        .map_err(Self::builder_err)?
                        .into(),
                }
            },
        };
        self.stack.push(value);
        Ok(())
    }
}
