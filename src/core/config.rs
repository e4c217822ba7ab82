//! Game configuration with documented constants
//!
//! All gameplay magic numbers are collected here with explanations of
//! their purpose and how they interact with each other.

/// Configuration for the movement validation and capture rules
///
/// These values have been tuned for on-foot play. Changing them will
/// affect anti-cheat strictness and territory turnover pacing.
#[derive(Debug, Clone)]
pub struct GameConfig {
    // === ANTI-CHEAT ===
    /// Maximum implied speed between two accepted fixes (km/h)
    ///
    /// 15 km/h covers a fast run with GPS jitter on top. Anything above
    /// suggests a vehicle and fails the whole location submission.
    pub max_speed_kmh: f64,

    /// Maximum device-reported horizontal accuracy radius (meters)
    ///
    /// Fixes coarser than this are useless for claiming ~16 m wide
    /// corridors and get rejected outright.
    pub max_accuracy_m: f64,

    // === PATH BUFFERING ===
    /// Half-width of the ground corridor claimed around a path (meters)
    ///
    /// Each path vertex is offset by this distance on both sides, so the
    /// claimed corridor is twice this wide.
    pub buffer_width_m: f64,

    // === SCORING ===
    /// Base points awarded per validated kilometer
    ///
    /// Base score is `floor(distance_km * points_per_km)`.
    pub points_per_km: f64,

    /// Flat bonus for creating a territory or taking one over
    pub capture_bonus: i64,

    // === TERRITORY LIFECYCLE ===
    /// Hours a freshly captured territory cannot be attacked
    pub protection_hours: i64,

    /// Ownership strength lost per hour once protection has lapsed
    ///
    /// Strength starts at 100, so at 10/hour a territory becomes
    /// stealable 10 hours after its protection window ends.
    pub decay_per_hour: f64,

    // === STORAGE ===
    /// Attempts per territory when a compare-and-swap write conflicts
    ///
    /// Each retry re-reads the record and re-runs the capture decision
    /// against the fresh state.
    pub max_write_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_speed_kmh: 15.0,
            max_accuracy_m: 30.0,
            buffer_width_m: 8.0,
            points_per_km: 10.0,
            capture_bonus: 50,
            protection_hours: 24,
            decay_per_hour: 10.0,
            max_write_attempts: 4,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_speed_kmh <= 0.0 || self.max_accuracy_m <= 0.0 {
            return Err("Anti-cheat limits must be positive".into());
        }

        if self.buffer_width_m <= 0.0 {
            return Err("buffer_width_m must be positive".into());
        }

        if self.protection_hours < 0 {
            return Err("protection_hours must not be negative".into());
        }

        if self.decay_per_hour <= 0.0 {
            return Err(format!(
                "decay_per_hour ({}) must be positive or territories never weaken",
                self.decay_per_hour
            ));
        }

        if self.max_write_attempts == 0 {
            return Err("max_write_attempts must be at least 1".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<GameConfig> = OnceLock::new();

/// Get the global game config (initializes with defaults if not set)
pub fn config() -> &'static GameConfig {
    CONFIG.get_or_init(GameConfig::default)
}

/// Set the global game config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: GameConfig) -> Result<(), GameConfig> {
    CONFIG.set(config)
}
