//! Maze construction parameters.

use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    error::{MazeError, Result},
    generator::{self, validate_complexity},
    maze::Maze,
    types::{GenerationAlgorithm, GenerationStep},
};

/// Logical side length used when none is given.
pub const DEFAULT_SIZE: usize = 15;

/// Extra-path complexity used when none is given.
pub const DEFAULT_COMPLEXITY: f64 = 0.05;

/// This structure holds the parameters describing a maze to generate.
///
/// The struct is plain data, so it can be filled in from command-line arguments field by field or
/// built up with the `with_*` methods. [`MazeConfig::validate`] checks it, and the `build` methods
/// validate before generating anything, so an invalid configuration never allocates a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeConfig {
    /// This field holds the logical side length `N`. It must be at least one.
    pub size: usize,
    /// This field holds the fraction of `N^2` used as the number of extra walls to remove once the
    /// spanning tree is complete. Zero yields a perfect maze, and values around `0.05` to `0.15`
    /// add a handful of cycles. It must be finite and non-negative.
    pub complexity: f64,
    /// This field holds the algorithm used to carve the spanning tree.
    pub algorithm: GenerationAlgorithm,
    /// This field holds the seed of the random source. With a seed, building the same
    /// configuration twice yields the same maze; without one, every build draws fresh entropy from
    /// the OS.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl MazeConfig {
    /// Configuration for an `N x N` maze with the default complexity and algorithm.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            complexity: DEFAULT_COMPLEXITY,
            algorithm: GenerationAlgorithm::DfsBacktrack,
            seed: None,
        }
    }

    /// Sets the extra-path complexity.
    #[must_use]
    pub const fn with_complexity(self, complexity: f64) -> Self {
        Self { complexity, ..self }
    }

    /// Sets the generation algorithm.
    #[must_use]
    pub const fn with_algorithm(self, algorithm: GenerationAlgorithm) -> Self {
        Self { algorithm, ..self }
    }

    /// Makes generation reproducible.
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Checks the parameters without generating anything.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidSize`] for a zero size and [`MazeError::InvalidComplexity`]
    /// for a negative or non-finite complexity.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(MazeError::InvalidSize(self.size));
        }

        validate_complexity(self.complexity)
    }

    /// Generates the configured maze.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`MazeConfig::validate`].
    pub fn build(&self) -> Result<Maze> {
        self.validate()?;
        generator::generate(
            self.size,
            self.complexity,
            self.algorithm,
            &mut rng_from_seed(self.seed),
        )
    }

    /// Generates the configured maze together with its carving steps.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`MazeConfig::validate`].
    pub fn build_recorded(&self) -> Result<(Maze, Vec<GenerationStep>)> {
        self.validate()?;
        generator::generate_recorded(
            self.size,
            self.complexity,
            self.algorithm,
            &mut rng_from_seed(self.seed),
        )
    }
}

/// Random source for an optional seed, falling back to OS entropy.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();

        assert_eq!(config.size, 15);
        assert!((config.complexity - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.algorithm, GenerationAlgorithm::DfsBacktrack);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_methods() {
        let config = MazeConfig::new(4)
            .with_complexity(0.25)
            .with_algorithm(GenerationAlgorithm::Kruskal)
            .with_seed(7);

        assert_eq!(config.size, 4);
        assert!((config.complexity - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.algorithm, GenerationAlgorithm::Kruskal);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate() {
        assert_eq!(MazeConfig::new(1).validate(), Ok(()));
        assert_eq!(
            MazeConfig::new(0).validate(),
            Err(MazeError::InvalidSize(0))
        );
        assert!(matches!(
            MazeConfig::new(3).with_complexity(-0.5).validate(),
            Err(MazeError::InvalidComplexity(_))
        ));
        assert!(matches!(
            MazeConfig::new(3).with_complexity(f64::NAN).validate(),
            Err(MazeError::InvalidComplexity(_))
        ));
        assert!(matches!(
            MazeConfig::new(3).with_complexity(f64::INFINITY).build(),
            Err(MazeError::InvalidComplexity(_))
        ));
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let config = MazeConfig::new(9)
            .with_algorithm(GenerationAlgorithm::Prim)
            .with_seed(99);

        let first = config.build().expect("valid config");
        let second = config.build().expect("valid config");
        let (recorded, steps) = config.build_recorded().expect("valid config");

        assert_eq!(first, second);
        assert_eq!(first, recorded);
        assert!(!steps.is_empty());
    }

    #[test]
    fn test_unseeded_build_is_valid() {
        let maze = MazeConfig::new(6)
            .with_complexity(0.0)
            .build()
            .expect("valid config");

        assert_eq!(maze.size(), 6);
        assert_eq!(maze.passage_count(), 35);
    }
}
