pub struct Icons;

impl Icons {
    pub const CAR: &str = "🚗";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
    pub const PHONE: &str = "📱";
    pub const CAMERA: &str = "📷";
    pub const DEL: &str = "🗑️";
    pub const MOD: &str = "📝";
    pub const NEW: &str = "✨";
    pub const GEAR: &str = "⚙️";
}
