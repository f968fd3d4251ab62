//! Purchase-bundle valuation — everything on a common value-per-draw basis.
//!
//! Heterogeneous bundles (draws, diamonds, stamina) convert to diamonds
//! first, then back to a per-draw price, so a 10-draw pack and a
//! diamond-only pack rank on the same axis.

use std::collections::HashSet;

use crate::constants::{DIAMONDS_PER_DRAW, DIAMONDS_PER_STAMINA};
use crate::model::{Package, PricingOption};

/// Normalized cost of one draw for a bundle at `price`.
///
/// A bundle with neither draws nor diamonds has no draw basis and values
/// at zero no matter how much stamina it carries — domain policy, not an
/// omission. Never negative, never divides by zero.
pub fn value_per_draw(price: f64, draws: f64, diamonds: f64, stamina: f64) -> f64 {
    if draws == 0.0 && diamonds == 0.0 {
        return 0.0;
    }
    let total_diamond_value = diamonds + draws * DIAMONDS_PER_DRAW + stamina * DIAMONDS_PER_STAMINA;
    (price / total_diamond_value * DIAMONDS_PER_DRAW).max(0.0)
}

/// Value-per-draw of one authored pricing option.
pub fn option_value(option: &PricingOption) -> f64 {
    value_per_draw(
        option.price,
        option.total_draws,
        option.diamonds,
        option.stamina,
    )
}

/// A pricing option paired with its derived value.
#[derive(Debug, Clone, Copy)]
pub struct RankedOption<'a> {
    pub option: &'a PricingOption,
    pub value_per_draw: f64,
}

/// A package's options ordered cheapest value-per-draw first.
pub fn rank_options(package: &Package) -> Vec<RankedOption<'_>> {
    let mut ranked: Vec<_> = package
        .pricing_options
        .iter()
        .map(|option| RankedOption {
            option,
            value_per_draw: option_value(option),
        })
        .collect();
    ranked.sort_by(|a, b| a.value_per_draw.total_cmp(&b.value_per_draw));
    ranked
}

/// Cheapest value-per-draw among a package's options, if it has any.
pub fn best_option_value(package: &Package) -> Option<f64> {
    package
        .pricing_options
        .iter()
        .map(option_value)
        .min_by(f64::total_cmp)
}

/// Order `packages` by their cheapest contained option, restricted to the
/// ids in `used`. Packages without options sort last.
pub fn rank_packages<'a>(packages: &'a [Package], used: &HashSet<&str>) -> Vec<&'a Package> {
    let mut ranked: Vec<&Package> = packages
        .iter()
        .filter(|p| used.contains(p.id.as_str()))
        .collect();
    ranked.sort_by(|a, b| {
        let a_min = best_option_value(a).unwrap_or(f64::INFINITY);
        let b_min = best_option_value(b).unwrap_or(f64::INFINITY);
        a_min.total_cmp(&b_min)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str, price: f64, draws: f64, diamonds: f64, stamina: f64) -> PricingOption {
        PricingOption {
            name: name.into(),
            price,
            total_draws: draws,
            diamonds,
            stamina,
        }
    }

    fn package(id: &str, options: Vec<PricingOption>) -> Package {
        Package {
            id: id.into(),
            name: id.into(),
            description: None,
            is_active: true,
            pricing_options: options,
        }
    }

    #[test]
    fn test_value_per_draw_mixed_bundle() {
        // 330 / (68 + 10*150) * 150 = 330 / 1568 * 150 ≈ 31.57
        let v = value_per_draw(330.0, 10.0, 68.0, 0.0);
        assert!((v - 330.0 / 1568.0 * 150.0).abs() < 1e-9);
        assert!(v > 31.0 && v < 32.0);
    }

    #[test]
    fn test_value_per_draw_pure_draws() {
        // 33 for a single draw is exactly 33 per draw.
        let v = value_per_draw(33.0, 1.0, 0.0, 0.0);
        assert!((v - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_stamina_only_bundle_has_no_draw_value() {
        assert_eq!(value_per_draw(100.0, 0.0, 0.0, 500.0), 0.0);
    }

    #[test]
    fn test_stamina_contributes_when_draw_basis_exists() {
        // 10 + (100 + 60*0.5) diamonds = 130 diamond value.
        let v = value_per_draw(10.0, 0.0, 100.0, 60.0);
        assert!((v - 10.0 / 130.0 * 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(value_per_draw(-50.0, 1.0, 0.0, 0.0), 0.0);
        assert_eq!(value_per_draw(0.0, 1.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_rank_options_cheapest_first() {
        let pkg = package(
            "pkg001",
            vec![
                option("畫材大禮包", 330.0, 10.0, 68.0, 0.0),
                option("顏料禮包", 33.0, 1.0, 0.0, 0.0),
                option("月卡特惠盒", 170.0, 6.0, 0.0, 0.0),
            ],
        );
        let ranked = rank_options(&pkg);
        assert_eq!(ranked[0].option.name, "月卡特惠盒"); // ≈ 28.3
        assert_eq!(ranked[1].option.name, "畫材大禮包"); // ≈ 31.6
        assert_eq!(ranked[2].option.name, "顏料禮包"); // 33.0
        assert!(ranked[0].value_per_draw <= ranked[1].value_per_draw);
        assert!(ranked[1].value_per_draw <= ranked[2].value_per_draw);
    }

    #[test]
    fn test_rank_packages_by_best_option() {
        let packages = vec![
            package("pkg001", vec![option("顏料禮包", 33.0, 1.0, 0.0, 0.0)]),
            package("pkg002", vec![option("月卡特惠盒", 170.0, 6.0, 0.0, 0.0)]),
            package("pkg003", vec![option("豪華禮包", 990.0, 20.0, 0.0, 0.0)]),
        ];
        let used: HashSet<&str> = ["pkg001", "pkg002", "pkg003"].into_iter().collect();
        let ranked = rank_packages(&packages, &used);
        assert_eq!(ranked[0].id, "pkg002"); // ≈ 28.3 per draw
        assert_eq!(ranked[1].id, "pkg001"); // 33.0
        assert_eq!(ranked[2].id, "pkg003"); // 49.5
    }

    #[test]
    fn test_rank_packages_skips_unreferenced() {
        let packages = vec![
            package("pkg001", vec![option("顏料禮包", 33.0, 1.0, 0.0, 0.0)]),
            package("pkg002", vec![option("月卡特惠盒", 170.0, 6.0, 0.0, 0.0)]),
        ];
        let used: HashSet<&str> = ["pkg001"].into_iter().collect();
        let ranked = rank_packages(&packages, &used);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "pkg001");
    }

    #[test]
    fn test_rank_packages_empty_options_sort_last() {
        let packages = vec![
            package("pkg001", vec![]),
            package("pkg002", vec![option("月卡特惠盒", 170.0, 6.0, 0.0, 0.0)]),
        ];
        let used: HashSet<&str> = ["pkg001", "pkg002"].into_iter().collect();
        let ranked = rank_packages(&packages, &used);
        assert_eq!(ranked[0].id, "pkg002");
        assert_eq!(ranked[1].id, "pkg001");
    }
}
