use std::time::Instant;

use log::info;
use ndarray::Array2;
use ndarray_rand::{rand_distr::Normal, RandomExt};
use rand::{rngs::StdRng, Rng, SeedableRng};

use softmax_objective::{
    gradcheck::{numerical_gradient, relative_error},
    NaiveSoftmax, Objective, Result, VectorizedSoftmax,
};

const DIM: usize = 64;
const CLASSES: usize = 10;
const SAMPLES: usize = 256;
const REG: f64 = 0.05;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let weights = Array2::random_using((DIM, CLASSES), normal, &mut rng) * 0.001;
    let features = Array2::random_using((SAMPLES, DIM), normal, &mut rng);
    let labels: Vec<usize> = (0..SAMPLES).map(|_| rng.random_range(0..CLASSES)).collect();

    let start = Instant::now();
    let (naive_loss, naive_grad) =
        NaiveSoftmax.loss_grad(weights.view(), features.view(), &labels, REG)?;
    let naive_elapsed = start.elapsed();

    let start = Instant::now();
    let (vec_loss, vec_grad) =
        VectorizedSoftmax.loss_grad(weights.view(), features.view(), &labels, REG)?;
    let vec_elapsed = start.elapsed();

    let grad_gap = (&naive_grad - &vec_grad)
        .iter()
        .fold(0.0f64, |m, d| m.max(d.abs()));

    info!("naive: loss {naive_loss:.6} in {naive_elapsed:?}");
    info!("vectorized: loss {vec_loss:.6} in {vec_elapsed:?}");
    info!(
        "loss gap {:.3e}, max gradient gap {grad_gap:.3e}",
        (naive_loss - vec_loss).abs()
    );

    // Numerical check on a smaller problem; centered differences cost two
    // full evaluations per weight entry.
    let small_w = Array2::random_using((6, 4), normal, &mut rng) * 0.01;
    let small_x = Array2::random_using((16, 6), normal, &mut rng);
    let small_y: Vec<usize> = (0..16).map(|_| rng.random_range(0..4)).collect();

    let (_, analytic) = VectorizedSoftmax.loss_grad(small_w.view(), small_x.view(), &small_y, 0.0)?;
    let numeric = numerical_gradient(
        |w| {
            VectorizedSoftmax
                .loss_grad(w, small_x.view(), &small_y, 0.0)
                .map(|(loss, _)| loss)
                .unwrap_or(f64::NAN)
        },
        small_w.view(),
        1e-5,
    );

    let max_rel = analytic
        .iter()
        .zip(numeric.iter())
        .map(|(&a, &n)| relative_error(a, n))
        .fold(0.0f64, f64::max);

    info!("max relative error vs centered differences: {max_rel:.3e}");

    Ok(())
}
