//! Symbolic model of the generator step for bit-vector solving

use crate::config::GeneratorConfig;
use z3::ast::BV;
use z3::Context;

/// Bit width of a seed.
pub const SEED_WIDTH: u32 = 64;

/// Build the symbolic generator-seed expression over an unknown seed.
///
/// The returned expression is a pure tree over the single free variable
/// `seed`; all other leaves are constants from the generator config. It
/// mirrors `GeneratorRules::advance` exactly:
///
/// 1. `s1 = seed ^ xor_const`
/// 2. `s0 = rotl(seed, rot_a) ^ s1 ^ (s1 * 2^mul_shift)`
/// 3. `s1' = rotl(s1, rot_b)`
/// 4. `gen_seed = s0 + s1'` (wrapping)
///
/// The model width follows the width of `seed`. Reversal always runs at
/// [`SEED_WIDTH`]; narrower variables build a reduced-width variant of the
/// same model, which keeps exhaustive cross-checks against the concrete step
/// tractable.
pub fn build_gen_seed_model<'ctx>(
    ctx: &'ctx Context,
    generator: &GeneratorConfig,
    seed: &BV<'ctx>,
) -> BV<'ctx> {
    let width = seed.get_size();
    let mask = width_mask(width);

    let xor_const = BV::from_u64(ctx, generator.xor_const & mask, width);
    let multiplier = BV::from_u64(ctx, (1u64 << generator.mul_shift) & mask, width);
    let rot_a = BV::from_u64(ctx, u64::from(generator.rot_a), width);
    let rot_b = BV::from_u64(ctx, u64::from(generator.rot_b), width);

    let s1 = seed.bvxor(&xor_const);
    let s0 = seed
        .bvrotl(&rot_a)
        .bvxor(&s1)
        .bvxor(&s1.bvmul(&multiplier));
    let s1 = s1.bvrotl(&rot_b);

    s0.bvadd(&s1)
}

/// All-ones mask for a bit width up to 64.
pub(crate) fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorRules;
    use z3::ast::Ast;
    use z3::{Config, Context, SatResult, Solver};

    #[test]
    fn test_model_agrees_with_concrete_step() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let generator = GeneratorConfig::default();

        for seed_value in [0u64, 1, 0x1234_5678_9ABC_DEF0, u64::MAX] {
            let seed = BV::new_const(&ctx, "seed", SEED_WIDTH);
            let model_expr = build_gen_seed_model(&ctx, &generator, &seed);
            let expected = GeneratorRules::gen_seed(seed_value, &generator);

            let solver = Solver::new(&ctx);
            solver.assert(&seed._eq(&BV::from_u64(&ctx, seed_value, SEED_WIDTH)));
            solver.assert(&model_expr._eq(&BV::from_u64(&ctx, expected, SEED_WIDTH)));
            assert_eq!(solver.check(), SatResult::Sat);
        }
    }

    #[test]
    fn test_model_rejects_wrong_output() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let generator = GeneratorConfig::default();

        let seed = BV::new_const(&ctx, "seed", SEED_WIDTH);
        let model_expr = build_gen_seed_model(&ctx, &generator, &seed);
        let expected = GeneratorRules::gen_seed(0, &generator);

        let solver = Solver::new(&ctx);
        solver.assert(&seed._eq(&BV::from_u64(&ctx, 0, SEED_WIDTH)));
        // Off by one from the true forward value: no assignment can satisfy it.
        let wrong = expected.wrapping_add(1);
        solver.assert(&model_expr._eq(&BV::from_u64(&ctx, wrong, SEED_WIDTH)));
        assert_eq!(solver.check(), SatResult::Unsat);
    }

    #[test]
    fn test_reduced_width_model_matches_reduced_step() {
        // 8-bit variant of the same expression tree, checked against a
        // hand-evaluated step: seed 0x75, const 0x5B, rot 3/5, mul 2^2
        // produces gen seed 0x02.
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let generator = GeneratorConfig {
            xor_const: 0x5B,
            rot_a: 3,
            rot_b: 5,
            mul_shift: 2,
        };

        let seed = BV::new_const(&ctx, "seed", 8);
        let model_expr = build_gen_seed_model(&ctx, &generator, &seed);

        let solver = Solver::new(&ctx);
        solver.assert(&seed._eq(&BV::from_u64(&ctx, 0x75, 8)));
        solver.assert(&model_expr._eq(&BV::from_u64(&ctx, 0x02, 8)));
        assert_eq!(solver.check(), SatResult::Sat);
    }

    #[test]
    fn test_width_mask() {
        assert_eq!(width_mask(8), 0xFF);
        assert_eq!(width_mask(63), u64::MAX >> 1);
        assert_eq!(width_mask(64), u64::MAX);
    }
}
