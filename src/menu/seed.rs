//! Declarative seed tables for the built-in catalog.
//!
//! One flat table, parents before or after children, ids unique across the
//! whole table. `catalog::validate_seed` runs over it in tests to catch
//! copy-paste duplicates.

use crate::menu::model::ROOT_ID;
use crate::menu::value::{ConfigSpec, ConfigValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    Category,
    Item,
    Slider {
        min: i64,
        max: i64,
        step: i64,
        value: i64,
        unit: &'static str,
    },
    Dropdown {
        options: &'static [(&'static str, &'static str)],
        value: &'static str,
    },
    Toggle(bool),
    Text(&'static str),
}

/// One row of seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedEntry {
    pub id: &'static str,
    pub parent: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub kind: SeedKind,
    pub default: bool,
    pub ansible_var: Option<&'static str>,
}

impl SeedEntry {
    pub const fn category(
        id: &'static str,
        parent: &'static str,
        label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            parent,
            label,
            description,
            kind: SeedKind::Category,
            default: false,
            ansible_var: None,
        }
    }

    pub const fn item(
        id: &'static str,
        parent: &'static str,
        label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            kind: SeedKind::Item,
            ..Self::category(id, parent, label, description)
        }
    }

    /// Selected on first run and after reset.
    pub const fn on(mut self) -> Self {
        self.default = true;
        self
    }

    pub const fn var(mut self, name: &'static str) -> Self {
        self.ansible_var = Some(name);
        self
    }

    pub const fn slider(
        mut self,
        min: i64,
        max: i64,
        step: i64,
        value: i64,
        unit: &'static str,
    ) -> Self {
        self.kind = SeedKind::Slider {
            min,
            max,
            step,
            value,
            unit,
        };
        self
    }

    pub const fn dropdown(
        mut self,
        options: &'static [(&'static str, &'static str)],
        value: &'static str,
    ) -> Self {
        self.kind = SeedKind::Dropdown { options, value };
        self
    }

    pub const fn toggle(mut self, value: bool) -> Self {
        self.kind = SeedKind::Toggle(value);
        self
    }

    pub const fn text(mut self, value: &'static str) -> Self {
        self.kind = SeedKind::Text(value);
        self
    }

    pub fn is_category(&self) -> bool {
        matches!(self.kind, SeedKind::Category)
    }

    /// Spec and initial value for configurable entries.
    pub fn config(&self) -> Option<(ConfigSpec, ConfigValue)> {
        match self.kind {
            SeedKind::Category | SeedKind::Item => None,
            SeedKind::Slider {
                min,
                max,
                step,
                value,
                unit,
            } => Some((
                ConfigSpec::Slider {
                    min,
                    max,
                    step,
                    unit: unit.to_string(),
                },
                ConfigValue::Slider(value),
            )),
            SeedKind::Dropdown { options, value } => Some((
                ConfigSpec::Dropdown {
                    options: options
                        .iter()
                        .map(|(value, label)| (value.to_string(), label.to_string()))
                        .collect(),
                },
                ConfigValue::Dropdown(value.to_string()),
            )),
            SeedKind::Toggle(value) => Some((ConfigSpec::Toggle, ConfigValue::Toggle(value))),
            SeedKind::Text(value) => Some((ConfigSpec::Text, ConfigValue::Text(value.to_string()))),
        }
    }
}

const GOVERNORS: &[(&str, &str)] = &[
    ("schedutil", "Scheduler driven"),
    ("performance", "Performance"),
    ("powersave", "Power save"),
    ("ondemand", "On demand"),
];

const IO_SCHEDULERS: &[(&str, &str)] = &[
    ("mq-deadline", "MQ deadline"),
    ("bfq", "BFQ"),
    ("kyber", "Kyber"),
    ("none", "None"),
];

const DESKTOP_THEMES: &[(&str, &str)] = &[
    ("system", "Follow system"),
    ("dark", "Dark"),
    ("light", "Light"),
];

const SHELLS: &[(&str, &str)] = &[
    ("bash", "Bash"),
    ("zsh", "Zsh"),
    ("fish", "Fish"),
];

pub const ENTRIES: &[SeedEntry] = &[
    // Development
    SeedEntry::category("development", ROOT_ID, "Development", "Languages, runtimes and developer tools"),
    SeedEntry::category("dev-languages", "development", "Languages", "Compilers and interpreters"),
    SeedEntry::item("python", "dev-languages", "Python", "Python 3 with pip and venv").on().var("install_python"),
    SeedEntry::item("nodejs", "dev-languages", "Node.js", "Node.js LTS with npm").var("install_nodejs"),
    SeedEntry::item("rust", "dev-languages", "Rust", "rustup with the stable toolchain").var("install_rust"),
    SeedEntry::item("golang", "dev-languages", "Go", "Go toolchain from upstream releases").var("install_golang"),
    SeedEntry::item("openjdk", "dev-languages", "OpenJDK", "Java development kit").var("install_openjdk"),
    SeedEntry::category("dev-tools", "development", "Tools", "Version control, editors and build tools"),
    SeedEntry::item("git", "dev-tools", "Git", "Distributed version control").on().var("install_git"),
    SeedEntry::item("build-essential", "dev-tools", "Build essentials", "gcc, make and headers").on().var("install_build_essential"),
    SeedEntry::item("vscode", "dev-tools", "Visual Studio Code", "Code editor from the upstream repository").var("install_vscode"),
    SeedEntry::item("neovim", "dev-tools", "Neovim", "Terminal text editor").var("install_neovim"),
    SeedEntry::item("github-cli", "dev-tools", "GitHub CLI", "gh command-line client").var("install_github_cli"),
    SeedEntry::category("dev-containers", "development", "Containers", "Container engines and orchestration"),
    SeedEntry::item("docker", "dev-containers", "Docker", "Docker engine and compose plugin").var("install_docker"),
    SeedEntry::item("podman", "dev-containers", "Podman", "Daemonless container engine").var("install_podman"),
    SeedEntry::item("kubectl", "dev-containers", "kubectl", "Kubernetes command-line client").var("install_kubectl"),
    // Internet
    SeedEntry::category("internet", ROOT_ID, "Internet", "Browsers, mail and chat"),
    SeedEntry::item("firefox", "internet", "Firefox", "Mozilla web browser").on().var("install_firefox"),
    SeedEntry::item("chromium", "internet", "Chromium", "Open-source Chrome browser").var("install_chromium"),
    SeedEntry::item("thunderbird", "internet", "Thunderbird", "Mail and calendar client").var("install_thunderbird"),
    SeedEntry::item("signal", "internet", "Signal", "Encrypted messenger").var("install_signal"),
    SeedEntry::item("transmission", "internet", "Transmission", "BitTorrent client").var("install_transmission"),
    // Multimedia
    SeedEntry::category("multimedia", ROOT_ID, "Multimedia", "Audio, video and graphics"),
    SeedEntry::item("vlc", "multimedia", "VLC", "Media player").on().var("install_vlc"),
    SeedEntry::item("gimp", "multimedia", "GIMP", "Image editor").var("install_gimp"),
    SeedEntry::item("inkscape", "multimedia", "Inkscape", "Vector graphics editor").var("install_inkscape"),
    SeedEntry::item("obs-studio", "multimedia", "OBS Studio", "Screen recording and streaming").var("install_obs_studio"),
    SeedEntry::item("codecs", "multimedia", "Restricted codecs", "Extra audio and video codecs").on().var("install_codecs"),
    // Desktop
    SeedEntry::category("desktop", ROOT_ID, "Desktop", "Desktop environment and appearance"),
    SeedEntry::category("desktop-environments", "desktop", "Environments", "Full desktop environments"),
    SeedEntry::item("gnome", "desktop-environments", "GNOME", "GNOME desktop").var("desktop_gnome"),
    SeedEntry::item("kde", "desktop-environments", "KDE Plasma", "Plasma desktop").var("desktop_kde"),
    SeedEntry::item("xfce", "desktop-environments", "Xfce", "Lightweight desktop").var("desktop_xfce"),
    SeedEntry::category("desktop-appearance", "desktop", "Appearance", "Themes and fonts"),
    SeedEntry::item("desktop-theme", "desktop-appearance", "Theme", "Colour scheme for the desktop")
        .dropdown(DESKTOP_THEMES, "system")
        .var("desktop_theme"),
    SeedEntry::item("font-scaling", "desktop-appearance", "Font scaling", "Text scaling factor")
        .slider(75, 200, 5, 100, "%")
        .var("desktop_font_scaling"),
    SeedEntry::item("nerd-fonts", "desktop-appearance", "Nerd Fonts", "Patched fonts with icon glyphs").var("desktop_nerd_fonts"),
    // System
    SeedEntry::category("system", ROOT_ID, "System", "Kernel, services and security"),
    SeedEntry::category("system-perf", "system", "Performance", "Kernel tuning"),
    SeedEntry::item("swappiness", "system-perf", "Swappiness", "vm.swappiness: how eagerly the kernel swaps")
        .slider(0, 100, 5, 60, "")
        .var("vm_swappiness"),
    SeedEntry::item("cpu-governor", "system-perf", "CPU governor", "Default cpufreq scaling governor")
        .dropdown(GOVERNORS, "schedutil")
        .var("cpu_governor"),
    SeedEntry::item("io-scheduler", "system-perf", "I/O scheduler", "Block device scheduler")
        .dropdown(IO_SCHEDULERS, "mq-deadline")
        .var("io_scheduler"),
    SeedEntry::item("zram", "system-perf", "zram swap", "Compressed swap in RAM")
        .toggle(true)
        .var("enable_zram"),
    SeedEntry::item("zram-size", "system-perf", "zram size", "Share of RAM used for zram")
        .slider(10, 100, 10, 50, "%")
        .var("zram_size_percent"),
    SeedEntry::category("system-security", "system", "Security", "Firewall and hardening"),
    SeedEntry::item("ufw", "system-security", "Firewall (ufw)", "Deny incoming, allow outgoing").on().var("install_ufw"),
    SeedEntry::item("fail2ban", "system-security", "fail2ban", "Ban hosts with repeated auth failures").var("install_fail2ban"),
    SeedEntry::item("unattended-upgrades", "system-security", "Automatic updates", "Install security updates unattended")
        .on()
        .var("enable_unattended_upgrades"),
    SeedEntry::item("ssh-server", "system-security", "SSH server", "OpenSSH server with key-only login").var("install_ssh_server"),
    SeedEntry::category("system-shell", "system", "Shell", "Login shell and prompt"),
    SeedEntry::item("login-shell", "system-shell", "Login shell", "Shell for the primary user")
        .dropdown(SHELLS, "bash")
        .var("login_shell"),
    SeedEntry::item("starship", "system-shell", "Starship prompt", "Cross-shell prompt").var("install_starship"),
    SeedEntry::item("hostname", "system-shell", "Hostname", "Machine hostname")
        .text("workstation")
        .var("system_hostname"),
    // Utilities
    SeedEntry::category("utilities", ROOT_ID, "Utilities", "Everyday command-line tools"),
    SeedEntry::item("htop", "utilities", "htop", "Interactive process viewer").on().var("install_htop"),
    SeedEntry::item("ripgrep", "utilities", "ripgrep", "Fast recursive search").var("install_ripgrep"),
    SeedEntry::item("fzf", "utilities", "fzf", "Fuzzy finder").var("install_fzf"),
    SeedEntry::item("tmux", "utilities", "tmux", "Terminal multiplexer").var("install_tmux"),
    SeedEntry::item("flatpak", "utilities", "Flatpak", "Flatpak with the Flathub remote").var("install_flatpak"),
];
