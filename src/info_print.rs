//! Verbose progress printing, gated on [`Settings::verbose`].
//!
//! The solvers call these at well defined points; nothing here affects
//! results.

use crate::algebra::FloatT;
use crate::problem::{ConvexityReport, Problem, QpForm, VariableId};
use crate::settings::Settings;
use crate::solution::SolverStatus;

fn print_banner() {
    println!("-------------------------------------------------------");
    println!(
        "       karush v{}  -  KKT optimization engine",
        env!("CARGO_PKG_VERSION")
    );
    println!("-------------------------------------------------------");
}

pub(crate) fn print_kkt_configuration<T: FloatT>(
    settings: &Settings<T>,
    problem: &Problem,
    m: usize,
    k: usize,
) {
    if !settings.verbose {
        return;
    }
    print_banner();
    println!("method: analytical KKT case enumeration");
    println!("problem:");
    println!("  variables    = {}", problem.nvars());
    println!("  inequalities = {}", m);
    println!("  equalities   = {}", k);
    println!("  cases        = {}", 1u64 << m);
    print_settings(settings);
}

pub(crate) fn print_qp_configuration<T: FloatT>(
    settings: &Settings<T>,
    qp: &QpForm<T>,
    convexity: &ConvexityReport<T>,
) {
    if !settings.verbose {
        return;
    }
    print_banner();
    println!("method: two-phase simplex on the KKT tableau");
    println!("problem:");
    println!("  variables    = {}", qp.C.len());
    println!("  equalities   = {}", qp.n_eq());
    println!("  inequalities = {}", qp.n_ineq());
    print!("  eigenvalues(D) =");
    for ev in &convexity.eigenvalues {
        print!(" {:.3e}", ev);
    }
    println!();
    println!(
        "  convex       = {}",
        if convexity.is_convex() { "yes" } else { "no" }
    );
    print_settings(settings);
}

fn print_settings<T: FloatT>(settings: &Settings<T>) {
    let time_lim_str = {
        if settings.time_limit.is_infinite() {
            "Inf".to_string()
        } else {
            format!("{:?}", settings.time_limit)
        }
    };
    println!("settings:");
    println!(
        "  tol_feas = {:.1e}, zero_pivot_tol = {:.1e}, eps_convexity = {:.1e}",
        settings.tol_feas, settings.zero_pivot_tol, settings.eps_convexity
    );
    println!(
        "  max_pivots = {}, time limit = {}",
        settings.max_pivots, time_lim_str
    );
    println!(
        "  newton: max iter = {}, tol = {:.1e}",
        settings.newton_max_iter, settings.newton_tol
    );
    println!();
}

pub(crate) fn print_case<T: FloatT>(settings: &Settings<T>, mask: u64, m: usize, outcome: &str) {
    if !settings.verbose {
        return;
    }
    println!(
        "case {:0width$b}: {}",
        mask,
        outcome,
        width = m.max(1)
    );
}

pub(crate) fn print_pivot<T: FloatT>(
    settings: &Settings<T>,
    phase: u8,
    entering: VariableId,
    leaving: VariableId,
    pivot: T,
) {
    if !settings.verbose {
        return;
    }
    println!(
        "phase {}: {} enters, {} leaves, pivot = {:.6}",
        phase, entering, leaving, pivot
    );
}

pub(crate) fn print_footer<T: FloatT>(
    settings: &Settings<T>,
    status: SolverStatus,
    objective: T,
    solve_time: f64,
) {
    if !settings.verbose {
        return;
    }
    println!("-------------------------------------------------------");
    println!("terminated with status = {}", status);
    if status.is_solved() {
        println!("optimal objective = {:.6}", objective);
    }
    println!(
        "solve time = {:?}",
        std::time::Duration::from_secs_f64(solve_time)
    );
}
