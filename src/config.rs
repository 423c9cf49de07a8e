//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SUSHI_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::f32::consts::PI;
use std::path::Path;
use sushirun_core::{PanelLayout, TreadmillSettings};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit control configuration
    #[serde(default)]
    pub orbit: OrbitConfig,
    /// Treadmill speed limits and timing
    #[serde(default)]
    pub treadmill: TreadmillSettings,
    /// Control panel geometry
    #[serde(default)]
    pub panel: PanelLayout,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SUSHI_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SUSHI_TREADMILL__MAX_SPEED=4 -> treadmill.max_speed = 4.0
        figment = figment.merge(Env::prefixed("SUSHI_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sushi Run Club".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Orbit target [x, y, z]
    pub target: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 2.0, 5.0],
            target: [0.0, 0.3, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Orbit control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Drag rotation speed (1.0 = one turn per viewport height)
    pub rotate_speed: f32,
    /// Wheel zoom speed
    pub zoom_speed: f32,
    /// Closest orbit distance
    pub min_distance: f32,
    /// Farthest orbit distance
    pub max_distance: f32,
    /// Smallest polar angle in radians (0 = straight down from above)
    pub min_polar_angle: f32,
    /// Largest polar angle in radians
    pub max_polar_angle: f32,
    /// Fraction of pending rotation applied per 60 Hz frame (0 disables damping)
    pub damping_factor: f32,
    /// Spin continuously when idle
    pub auto_rotate: bool,
    /// Auto-rotation speed (2.0 = one turn per 30 seconds)
    pub auto_rotate_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.5,
            zoom_speed: 0.5,
            min_distance: 2.0,
            max_distance: 10.0,
            min_polar_angle: PI / 4.0,
            max_polar_angle: PI / 1.5,
            damping_factor: 0.1,
            auto_rotate: true,
            auto_rotate_speed: 1.5,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color as sRGB `0xRRGGBB`
    pub clear_color: u32,
    /// Position of the directional light; it shines towards the origin
    pub light_position: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Specular highlight strength
    pub specular_strength: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            clear_color: 0xf8fafc,
            light_position: [10.0, 10.0, 5.0],
            ambient_strength: 0.5,
            diffuse_strength: 0.8,
            specular_strength: 0.5,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show frame time and triangle count
    pub show_frame_stats: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_frame_stats: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
