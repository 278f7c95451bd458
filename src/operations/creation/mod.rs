mod random_points;

pub use random_points::RandomPoints;
