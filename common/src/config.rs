use std::time::Duration;

/// Global configuration options for a tether invocation.
///
/// This struct controls the runtime behavior of the application: output
/// density, machine-readable mode, and the policy switches consumed by the
/// network-change watcher. It is typically constructed from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Toggles the display of the startup banner line.
    ///
    /// If `true`, the application starts immediately with log output without
    /// printing the stylized branding. Useful for clean logs or scripted
    /// executions.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// This value is typically mapped from the `-q` or `--quiet` CLI flags.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, colors and headers.
    /// * **1**: Reduced styling, no headers.
    /// * **2**: Raw mode. Output is strictly data, suitable for piping.
    pub quiet: u8,

    /// Emit machine-readable JSON instead of the human-facing tree view.
    ///
    /// Only honored by commands that render snapshots (`list`). Log output
    /// still goes to stderr and is unaffected.
    pub json: bool,

    /// Opt-in switch for the automatic recovery policy.
    ///
    /// When `true`, the network-change watcher is allowed to reset adapters
    /// that are currently in manual mode back to DHCP after the attached
    /// network changes. When `false` (default), changes are reported but no
    /// configuration is touched. The watcher itself never consults this
    /// flag; the policy layer around it does.
    pub auto_revert: bool,

    /// How often the network-change watcher samples the current network
    /// identity. Sampling shells out to the system utilities, so values
    /// below one second mostly burn CPU on fork/exec.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            json: false,
            auto_revert: false,
            poll_interval: Duration::from_secs(2),
        }
    }
}
