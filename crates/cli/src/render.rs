//! Text and JSON renderings of structured results.
//!
//! Everything printed by the binary is produced here from `Membership` and
//! `FacilitySolution`; the library never formats prose.

use convexlab::cone::{Cone, Evidence, Membership};
use convexlab::facility::{DistanceStats, FacilitySolution, Point2};
use serde::Serialize;
use serde_json::{json, Value};

fn cone_symbol(cone: Cone) -> String {
    let n = cone.dim();
    match cone {
        Cone::Orthant(_) => format!("R^{n}_+"),
        Cone::SecondOrder(_) => format!("L^{n}"),
        Cone::Psd(_) => format!("S^{n}_+"),
    }
}

fn fmt_vec<'a>(xs: impl IntoIterator<Item = &'a f64>) -> String {
    let parts: Vec<String> = xs.into_iter().map(|x| format!("{x}")).collect();
    format!("[{}]", parts.join(", "))
}

/// Narrated explanation of `lhs ⪰_K rhs` from its membership evidence.
pub fn explain(lhs: &str, rhs: &str, m: &Membership) -> String {
    let k = cone_symbol(m.cone);
    let mut out = Vec::new();
    match &m.evidence {
        Evidence::Orthant {
            v,
            min_component,
            negative,
        } => {
            out.push(format!("{lhs} - {rhs} = {}", fmt_vec(v.iter())));
            for (i, x) in v.iter().enumerate() {
                let ok = !negative.contains(&i);
                out.push(format!(
                    "  component {}: {x} >= 0? {ok} {}",
                    i + 1,
                    if ok { "✓" } else { "✗" }
                ));
            }
            if !m.holds {
                out.push(format!(
                    "  smallest component {min_component} < 0, so {lhs} - {rhs} is not in {k}"
                ));
            }
        }
        Evidence::SecondOrder {
            v,
            t,
            tail_norm,
            margin,
        } => {
            out.push(format!("{lhs} - {rhs} = {}", fmt_vec(v.iter())));
            out.push(format!("  t = {t}, ‖r‖₂ = {tail_norm:.4}"));
            out.push(format!(
                "  t >= ‖r‖₂? {} (margin {margin:.4})",
                m.holds
            ));
        }
        Evidence::Psd {
            m: diff,
            asymmetry,
            eigenvalues,
        } => {
            out.push(format!("{lhs} - {rhs} ="));
            for row in diff.row_iter() {
                out.push(format!("  {}", fmt_vec(row.iter())));
            }
            out.push(format!(
                "  symmetric? {} (max |M - Mᵗ| = {asymmetry:e})",
                eigenvalues.is_some()
            ));
            match eigenvalues {
                Some(ev) => {
                    let shown: Vec<String> = ev.iter().map(|l| format!("{l:.6}")).collect();
                    out.push(format!("  eigenvalues: [{}]", shown.join(", ")));
                    if let Some(min) = m.evidence.min_eigenvalue() {
                        if !m.holds {
                            out.push(format!("  smallest eigenvalue {min:.6} < 0"));
                        }
                    }
                }
                None => out.push("  not symmetric, so it cannot be in the PSD cone".to_string()),
            }
        }
    }
    let rel = if m.holds { "≽" } else { "⋡" };
    out.push(format!("Conclusion: {lhs} {rel}_{k} {rhs}"));
    out.join("\n")
}

pub fn membership_json(lhs: &str, rhs: &str, m: &Membership) -> Value {
    let evidence = match &m.evidence {
        Evidence::Orthant {
            v,
            min_component,
            negative,
        } => json!({
            "difference": v.iter().collect::<Vec<_>>(),
            "min_component": min_component,
            "negative": negative,
        }),
        Evidence::SecondOrder {
            v,
            t,
            tail_norm,
            margin,
        } => json!({
            "difference": v.iter().collect::<Vec<_>>(),
            "t": t,
            "tail_norm": tail_norm,
            "margin": margin,
        }),
        Evidence::Psd {
            m: diff,
            asymmetry,
            eigenvalues,
        } => json!({
            "difference": diff.row_iter().map(|r| r.iter().copied().collect::<Vec<f64>>()).collect::<Vec<_>>(),
            "asymmetry": asymmetry,
            "eigenvalues": eigenvalues,
        }),
    };
    json!({
        "lhs": lhs,
        "rhs": rhs,
        "cone": m.cone.name(),
        "dim": m.cone.dim(),
        "holds": m.holds,
        "eps": m.eps,
        "evidence": evidence,
    })
}

/// Serializable summary of a facility solve.
#[derive(Serialize)]
pub struct FacilityReport {
    pub status: String,
    pub iterations: u32,
    pub location: [f64; 2],
    pub radius: f64,
    /// Solver's epigraph variable `t`.
    pub bound: f64,
    pub villages: Vec<VillageRow>,
    pub active: Vec<usize>,
    pub stats: DistanceStats,
    pub distance_from_origin: f64,
    /// Whether the station lies in the sampling box; `None` for read-in villages.
    pub inside_box: Option<bool>,
}

#[derive(Serialize)]
pub struct VillageRow {
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub active: bool,
}

impl FacilityReport {
    /// `sampling_box` is `(lo, hi)` when the villages were drawn from `[lo, hi]²`.
    pub fn new(points: &[Point2], s: &FacilitySolution, sampling_box: Option<(f64, f64)>) -> Self {
        let villages = points
            .iter()
            .zip(&s.distances)
            .enumerate()
            .map(|(i, (p, d))| VillageRow {
                x: p.x,
                y: p.y,
                distance: *d,
                active: s.active.contains(&i),
            })
            .collect();
        let inside_box = sampling_box.map(|(lo, hi)| {
            let inside = |v: f64| (lo..=hi).contains(&v);
            inside(s.location.x) && inside(s.location.y)
        });
        Self {
            status: s.status.to_string(),
            iterations: s.iterations,
            location: [s.location.x, s.location.y],
            radius: s.radius,
            bound: s.bound,
            villages,
            active: s.active.clone(),
            stats: s.stats(),
            distance_from_origin: s.location.norm(),
            inside_box,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        out.push(format!("Solution status: {} ({} iterations)", self.status, self.iterations));
        out.push(format!(
            "Optimal location: v* = ({:.6}, {:.6})",
            self.location[0], self.location[1]
        ));
        out.push(format!("Minimum longest distance: t* = {:.6}", self.radius));
        out.push(String::new());
        out.push("Distance to each village:".to_string());
        for (i, v) in self.villages.iter().enumerate() {
            let tag = if v.active { " MAX" } else { "" };
            out.push(format!(
                "  village {:2} ({:.3}, {:.3}): {:.6}{tag}",
                i + 1,
                v.x,
                v.y,
                v.distance
            ));
        }
        out.push(format!(
            "Solver bound t = {:.6}, |t - t*| = {:.2e}",
            self.bound,
            (self.bound - self.radius).abs()
        ));
        out.push(format!("Villages at maximum distance: {}", self.active.len()));
        out.push(String::new());
        out.push(format!(
            "Distances: min {:.6}, max {:.6}, mean {:.6}, median {:.6}, std {:.6}",
            self.stats.min, self.stats.max, self.stats.mean, self.stats.median, self.stats.std_dev
        ));
        out.push(format!("Station distance from origin: {:.6}", self.distance_from_origin));
        if let Some(inside) = self.inside_box {
            out.push(format!("Station inside sampling box? {inside}"));
        }
        out.join("\n")
    }
}
