use grasp::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn main() {
    let (blob_cnt, blob_size, sample_dims) = (5, 60, 2);

    // Generate some blobs around random centers
    let mut rnd = ChaCha8Rng::seed_from_u64(1337);
    let mut samples = Vec::with_capacity(blob_cnt * blob_size * sample_dims);
    for _ in 0..blob_cnt {
        let center: Vec<f64> = (0..sample_dims).map(|_| rnd.gen_range(0.0..100.0)).collect();
        for _ in 0..blob_size {
            samples.extend(center.iter().map(|c| c + rnd.gen_range(-4.0..4.0)));
        }
    }

    let conf = GraspConfig::build()
        .seed(42)
        .construction_done(&|restart, clusters, greedy_cost|
            println!("Restart {} - Greedy solution built ({} clusters), cost: {:.2}",
                restart, clusters.len(), greedy_cost))
        .restart_done(&|s, best|
            println!("Restart {} - Cost: {:.2} -> {:.2} | {:?} after {} attempts, {} moves | Best: {:.2}{}",
                s.restart, s.greedy_cost, s.refined_cost, s.status, s.attempts, s.moves, best,
                if s.improved { " (new best)" } else { "" }))
        .build();

    let grasp = Grasp::new(samples, blob_cnt * blob_size, sample_dims).unwrap();
    let result = grasp.optimize(blob_cnt, 0.2, &conf).unwrap();

    println!("{}", Report::new("generated blobs", grasp.points(), &result));
}
