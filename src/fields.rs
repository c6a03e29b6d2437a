/// Attribution attached to every sensor reading
pub const ATTRIBUTION: &str = "Data provided by Open-Meteo Marine API";

/// Static descriptor of one measured marine quantity and its display metadata
pub struct FieldSpec {
    /// Key the value is stored under in a reading
    pub key: &'static str,
    /// Name of the variable in the Open-Meteo Marine API response
    pub api_param: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub icon: &'static str,
    pub device_class: Option<&'static str>,
    pub state_class: &'static str,
}

/// The six marine quantities requested from the API on every fetch
pub const FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        key: "wave_height",
        api_param: "wave_height",
        name: "Wave Height",
        unit: "m",
        icon: "mdi:wave",
        device_class: None,
        state_class: "measurement",
    },
    FieldSpec {
        key: "wave_direction",
        api_param: "wave_direction",
        name: "Wave Direction",
        unit: "°",
        icon: "mdi:compass",
        device_class: None,
        state_class: "measurement",
    },
    FieldSpec {
        key: "wave_period",
        api_param: "wave_period",
        name: "Wave Period",
        unit: "s",
        icon: "mdi:sine-wave",
        device_class: None,
        state_class: "measurement",
    },
    FieldSpec {
        key: "sea_surface_temperature",
        api_param: "sea_surface_temperature",
        name: "Sea Surface Temperature",
        unit: "°C",
        icon: "mdi:thermometer",
        device_class: Some("temperature"),
        state_class: "measurement",
    },
    FieldSpec {
        key: "current_velocity",
        api_param: "ocean_current_velocity",
        name: "Current Velocity",
        unit: "m/s",
        icon: "mdi:waves",
        device_class: None,
        state_class: "measurement",
    },
    FieldSpec {
        key: "current_direction",
        api_param: "ocean_current_direction",
        name: "Current Direction",
        unit: "°",
        icon: "mdi:compass-outline",
        device_class: None,
        state_class: "measurement",
    },
];
