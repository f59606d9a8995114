use rand::Rng;

pub struct StarFieldSystem {}

impl StarFieldSystem {
    /// Scatters `count` points uniformly inside an axis-aligned cube of edge
    /// `extent` centred on the globe.
    pub fn generate_positions<R: Rng>(rng: &mut R, count: usize, extent: f32) -> Vec<[f32; 3]> {
        (0..count)
            .map(|_| {
                [
                    (rng.gen::<f32>() - 0.5) * extent,
                    (rng.gen::<f32>() - 0.5) * extent,
                    (rng.gen::<f32>() - 0.5) * extent,
                ]
            })
            .collect()
    }
}
