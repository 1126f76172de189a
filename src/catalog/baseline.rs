//! Windows default values, shared by per-tweak inverses and the baseline reset.

/// A named group of commands restoring one area to its Windows default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineGroup {
    pub name: &'static str,
    pub commands: &'static [&'static str],
}

pub(crate) const TELEMETRY_DEFAULTS: &[&str] = &[
    r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\DataCollection" /v "AllowTelemetry" /f"#,
    r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Privacy" /v "TailoredExperiencesWithDiagnosticDataEnabled" /f"#,
    r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\AdvertisingInfo" /v "DisabledByGroupPolicy" /f"#,
    "sc config DiagTrack start= demand",
    "sc start DiagTrack",
];

pub(crate) const VISUAL_EFFECTS_DEFAULTS: &[&str] = &[
    r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "VisualFXSetting" /t REG_DWORD /d 3 /f"#,
    r#"reg add "HKCU\Control Panel\Desktop" /v "DragFullWindows" /t REG_SZ /d "1" /f"#,
];

pub(crate) const TRANSPARENCY_DEFAULTS: &[&str] = &[
    r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize" /v "EnableTransparency" /t REG_DWORD /d 1 /f"#,
];

pub(crate) const BACKGROUND_APPS_DEFAULTS: &[&str] = &[
    r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\BackgroundAccessApplications" /v "GlobalUserDisabled" /t REG_DWORD /d 0 /f"#,
];

pub(crate) const TASKBAR_ANIMATION_DEFAULTS: &[&str] = &[
    r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "TaskbarAnimations" /t REG_DWORD /d 1 /f"#,
];

pub(crate) const NOTIFICATION_SOUND_DEFAULTS: &[&str] = &[
    r#"reg add "HKCU\AppEvents\Schemes\Apps\.Default\.Default\.Current" /ve /t REG_SZ /d "%SystemRoot%\media\Windows Notify System Generic.wav" /f"#,
];

pub(crate) const SECURITY_LOG_DEFAULTS: &[&str] = &[
    "wevtutil sl Security /ms:20971520",
    "wevtutil sl Security /retention:false",
    "wevtutil sl Security /autobackup:false",
    "wevtutil sl Application /ms:20971520",
    "wevtutil sl Application /retention:false",
    "wevtutil sl System /ms:20971520",
    "wevtutil sl System /retention:false",
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Security" /v "MaxSize" /f"#,
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Security" /v "Retention" /f"#,
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Security" /v "AutoBackupLogFiles" /f"#,
];

pub(crate) const DOMAIN_TRUST_DEFAULTS: &[&str] = &[
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "ScavengeInterval" /f"#,
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "MaximumPasswordAge" /f"#,
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "SecureChannelIdleTimeout" /f"#,
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "SecureChannelTimeout" /f"#,
    r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "DisableDynamicUpdate" /f"#,
    "ipconfig /flushdns",
    "sc config Netlogon start= auto",
    "sc config w32time start= demand",
    "net stop Netlogon /y",
    "net start Netlogon",
    "klist purge",
    "gpupdate /force",
];

pub(crate) const POWER_PLAN_DEFAULTS: &[&str] =
    &["powercfg /setactive 381b4222-f694-41f0-9685-ff5bb260df2e"];

pub(crate) const SERVICE_START_MODE_DEFAULTS: &[&str] = &[
    "sc config DiagTrack start= demand",
    "sc config OneSyncSvc start= demand",
    "sc config WSearch start= auto",
    "sc config Spooler start= auto",
    "sc config WinDefend start= auto",
    "sc config Netlogon start= auto",
];

pub(crate) const DEFENDER_POLICY_DEFAULTS: &[&str] = &[
    r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows Defender" /v "DisableAntiSpyware" /f"#,
];

pub(crate) const SHUTDOWN_TIMEOUT_DEFAULTS: &[&str] = &[
    r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control" /v "WaitToKillServiceTimeout" /t REG_SZ /d "5000" /f"#,
    r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "0" /f"#,
    r#"reg add "HKCU\Control Panel\Desktop" /v "HungAppTimeout" /t REG_SZ /d "5000" /f"#,
    r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "20000" /f"#,
];

pub(crate) const FAST_BOOT_DEFAULTS: &[&str] = &[
    r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Power" /v "HiberbootEnabled" /t REG_DWORD /d 1 /f"#,
];

/// Groups re-applied by every restore, whether or not the ledger mentions them
pub const BASELINE_RESET: &[BaselineGroup] = &[
    BaselineGroup { name: "Telemetry", commands: TELEMETRY_DEFAULTS },
    BaselineGroup { name: "Visual Effects", commands: VISUAL_EFFECTS_DEFAULTS },
    BaselineGroup { name: "Transparency", commands: TRANSPARENCY_DEFAULTS },
    BaselineGroup { name: "Background Apps", commands: BACKGROUND_APPS_DEFAULTS },
    BaselineGroup { name: "Taskbar Animations", commands: TASKBAR_ANIMATION_DEFAULTS },
    BaselineGroup { name: "Notification Sounds", commands: NOTIFICATION_SOUND_DEFAULTS },
    BaselineGroup { name: "Security Log Sizing", commands: SECURITY_LOG_DEFAULTS },
    BaselineGroup { name: "Domain Trust Parameters", commands: DOMAIN_TRUST_DEFAULTS },
    BaselineGroup { name: "Power Plan", commands: POWER_PLAN_DEFAULTS },
    BaselineGroup { name: "Service Start Modes", commands: SERVICE_START_MODE_DEFAULTS },
    BaselineGroup { name: "Defender Policy", commands: DEFENDER_POLICY_DEFAULTS },
    BaselineGroup { name: "Shutdown Timeouts", commands: SHUTDOWN_TIMEOUT_DEFAULTS },
    BaselineGroup { name: "Fast Boot", commands: FAST_BOOT_DEFAULTS },
];
