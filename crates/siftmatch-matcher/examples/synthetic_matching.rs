use argh::FromArgs;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siftmatch_core::descriptor::quantize_descriptor;
use siftmatch_core::{Descriptor, DescriptorNormalization, FeatureMatch, Keypoint, DESCRIPTOR_DIM};
use siftmatch_geometry::{mat3_from_rows, TwoViewConfig, TwoViewGeometry};
use siftmatch_matcher::{
    match_guided_sift_features_inplace, match_sift_features, SiftMatchingOptions,
};

/// Matches two synthetic feature sets related by a homography
#[derive(Debug, FromArgs)]
struct Args {
    /// number of features per image
    #[argh(option, short = 'n', default = "500")]
    num_features: usize,

    /// fraction of features in the second image without a correspondence
    #[argh(option, short = 'o', default = "0.3")]
    outlier_ratio: f32,

    /// amplitude of the descriptor noise
    #[argh(option, default = "0.2")]
    noise: f32,

    /// ratio test threshold
    #[argh(option, default = "0.8")]
    max_ratio: f32,

    /// maximum homography transfer error in pixels
    #[argh(option, default = "4.0")]
    max_error: f64,

    /// disable cross-checking
    #[argh(switch)]
    no_cross_check: bool,

    /// random seed
    #[argh(option, default = "0")]
    seed: u64,
}

struct Scene {
    keypoints1: Vec<Keypoint>,
    keypoints2: Vec<Keypoint>,
    descriptors1: Vec<Descriptor>,
    descriptors2: Vec<Descriptor>,
    /// Index in image 2 of the true correspondence of each feature of image 1.
    ground_truth: Vec<Option<usize>>,
}

fn random_raw(rng: &mut StdRng) -> [f32; DESCRIPTOR_DIM] {
    let mut raw = [0.0f32; DESCRIPTOR_DIM];
    raw.iter_mut().for_each(|v| *v = rng.random::<f32>().powi(2));
    raw
}

fn generate_scene(args: &Args) -> Scene {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let n = args.num_features;

    // x' = 1.1 x + 20, y' = 1.1 y - 10
    let transform = |kp: &Keypoint| Keypoint::new(1.1 * kp.x + 20.0, 1.1 * kp.y - 10.0);

    let mut keypoints1 = Vec::with_capacity(n);
    let mut raw1 = Vec::with_capacity(n);
    for _ in 0..n {
        keypoints1.push(Keypoint::from_scale_orientation(
            rng.random::<f32>() * 640.0,
            rng.random::<f32>() * 480.0,
            1.0 + 4.0 * rng.random::<f32>(),
            std::f32::consts::TAU * rng.random::<f32>(),
        ));
        raw1.push(random_raw(&mut rng));
    }

    let mut keypoints2 = Vec::with_capacity(n);
    let mut descriptors2 = Vec::with_capacity(n);
    let mut ground_truth = vec![None; n];
    for i in 0..n {
        if rng.random::<f32>() < args.outlier_ratio {
            keypoints2.push(Keypoint::new(
                rng.random::<f32>() * 704.0,
                rng.random::<f32>() * 528.0,
            ));
            descriptors2.push(quantize_descriptor(
                &random_raw(&mut rng),
                DescriptorNormalization::L2,
            ));
        } else {
            let mut raw = raw1[i];
            raw.iter_mut()
                .for_each(|v| *v = (*v + args.noise * rng.random::<f32>()).max(0.0));
            ground_truth[i] = Some(keypoints2.len());
            keypoints2.push(transform(&keypoints1[i]));
            descriptors2.push(quantize_descriptor(&raw, DescriptorNormalization::L2));
        }
    }

    Scene {
        keypoints1,
        keypoints2,
        descriptors1: raw1
            .iter()
            .map(|raw| quantize_descriptor(raw, DescriptorNormalization::L2))
            .collect(),
        descriptors2,
        ground_truth,
    }
}

fn num_correct(matches: &[FeatureMatch], ground_truth: &[Option<usize>]) -> usize {
    matches
        .iter()
        .filter(|m| ground_truth[m.idx1] == Some(m.idx2))
        .count()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let scene = generate_scene(&args);
    let num_true = scene.ground_truth.iter().filter(|m| m.is_some()).count();

    let options = SiftMatchingOptions::default()
        .with_max_ratio(args.max_ratio)
        .with_max_error(args.max_error)
        .with_cross_check(!args.no_cross_check);

    let matches = match_sift_features(&scene.descriptors1, &scene.descriptors2, &options)?;
    println!(
        "appearance only: {} matches, {} correct, {} true correspondences",
        matches.len(),
        num_correct(&matches, &scene.ground_truth),
        num_true
    );

    let h = mat3_from_rows([[1.1, 0.0, 20.0], [0.0, 1.1, -10.0], [0.0, 0.0, 1.0]]);
    let mut geometry = TwoViewGeometry::from_homography(TwoViewConfig::Planar, h);
    match_guided_sift_features_inplace(
        &scene.keypoints1,
        &scene.keypoints2,
        &scene.descriptors1,
        &scene.descriptors2,
        &mut geometry,
        &options,
    )?;
    println!(
        "guided by homography: {} matches, {} correct",
        geometry.num_inliers(),
        num_correct(&geometry.inlier_matches, &scene.ground_truth)
    );

    Ok(())
}
