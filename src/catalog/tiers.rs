//! The built-in tweak tables, one per tier, in presentation order.

use super::baseline::*;
use crate::models::{Tier, TweakDefinition};

pub(crate) static BASIC: &[TweakDefinition] = &[
    TweakDefinition {
        id: "fix_domain_trust",
        name: "Fix Domain Trust Relationship",
        tier: Tier::Basic,
        summary: "Re-establish the secure channel and harden Netlogon against trust loss",
        forward: &[
            "net stop netlogon /y",
            "sc stop w32time",
            "klist purge -li 0x3e7",
            "klist purge",
            "cmdkey /delete:{{domain}}",
            "nltest /sc_reset:{{domain}}",
            "nltest /sc_verify:{{domain}}",
            "nltest /dsgetdc:{{domain}} /force",
            "ipconfig /flushdns",
            "ipconfig /registerdns",
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "DisableDynamicUpdate" /t REG_DWORD /d 0 /f"#,
            "w32tm /config /syncfromflags:domhier /update",
            "sc config w32time start= auto",
            "sc start w32time",
            "w32tm /resync /force",
            "sc config netlogon start= auto",
            "sc failure netlogon reset= 86400 actions= restart/5000/restart/10000/restart/30000",
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "ScavengeInterval" /t REG_DWORD /d 172800 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "MaximumPasswordAge" /t REG_DWORD /d 42 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "SecureChannelIdleTimeout" /t REG_DWORD /d 1209600 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Netlogon\Parameters" /v "SecureChannelTimeout" /t REG_DWORD /d 7200 /f"#,
            "gpupdate /force",
            "net start netlogon",
            "nltest /sc_query:{{domain}}",
        ],
        inverse: Some(DOMAIN_TRUST_DEFAULTS),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "fix_security_log_full",
        name: "Fix Security Log Full",
        tier: Tier::Basic,
        summary: "Grow the Security log to 128MB and overwrite old events as needed",
        forward: &[
            "wevtutil sl Security /ms:134217728",
            "wevtutil sl Security /retention:false",
            "wevtutil sl Security /autobackup:true",
            "wevtutil sl Application /ms:67108864",
            "wevtutil sl Application /retention:false",
            "wevtutil sl System /ms:67108864",
            "wevtutil sl System /retention:false",
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Security" /v "MaxSize" /t REG_DWORD /d 134217728 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Security" /v "Retention" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Security" /v "AutoBackupLogFiles" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(SECURITY_LOG_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_startup_apps",
        name: "Disable Startup Apps",
        tier: Tier::Basic,
        summary: "Remove auto-start entries and the startup delay",
        forward: &[
            "powershell Get-CimInstance Win32_StartupCommand | Remove-CimInstance",
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\StartupApproved" /v "StartupDelayInMSec" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: None,
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_visual_effects",
        name: "Disable Visual Effects",
        tier: Tier::Basic,
        summary: "Adjust for best performance and stop dragging full windows",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "VisualFXSetting" /t REG_DWORD /d 2 /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "DragFullWindows" /t REG_SZ /d "0" /f"#,
        ],
        inverse: Some(VISUAL_EFFECTS_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_transparency",
        name: "Disable Transparency",
        tier: Tier::Basic,
        summary: "Turn off transparency on the taskbar, Start and title bars",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize" /v "EnableTransparency" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(TRANSPARENCY_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_background_apps",
        name: "Disable Background Apps",
        tier: Tier::Basic,
        summary: "Stop Store apps from running in the background",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\BackgroundAccessApplications" /v "GlobalUserDisabled" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(BACKGROUND_APPS_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_taskbar_animations",
        name: "Optimize Taskbar Animations",
        tier: Tier::Basic,
        summary: "Disable taskbar animations",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "TaskbarAnimations" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(TASKBAR_ANIMATION_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_notification_sounds",
        name: "Disable Notification Sounds",
        tier: Tier::Basic,
        summary: "Mute the default notification sound",
        forward: &[
            r#"reg add "HKCU\AppEvents\Schemes\Apps\.Default\.Default\.Current" /ve /t REG_SZ /d "" /f"#,
        ],
        inverse: Some(NOTIFICATION_SOUND_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "enable_fast_start_menu",
        name: "Enable Fast Start Menu",
        tier: Tier::Basic,
        summary: "Speed up Start menu search",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "Start_SearchFiles" /t REG_DWORD /d 2 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "Start_SearchFiles" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_lockscreen_blur",
        name: "Disable Lockscreen Blur",
        tier: Tier::Basic,
        summary: "Remove the acrylic blur behind the sign-in screen",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\System" /v "DisableAcrylicBackgroundOnLogon" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\System" /v "DisableAcrylicBackgroundOnLogon" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_file_explorer",
        name: "Optimize File Explorer",
        tier: Tier::Basic,
        summary: "Show hidden files while keeping protected system files hidden",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "Hidden" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "ShowSuperHidden" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "Hidden" /t REG_DWORD /d 2 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "ShowSuperHidden" /t REG_DWORD /d 0 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_game_bar",
        name: "Disable Game Bar",
        tier: Tier::Basic,
        summary: "Turn off automatic Game Mode",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\GameBar" /v "AllowAutoGameMode" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\GameBar" /v "AllowAutoGameMode" /f"#,
        ]),
        requires_reboot: false,
    },
];

pub(crate) static STANDARD: &[TweakDefinition] = &[
    TweakDefinition {
        id: "reduce_telemetry",
        name: "Reduce Telemetry (Safe)",
        tier: Tier::Standard,
        summary: "Lower telemetry to the Basic level without touching the DiagTrack service",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\DataCollection" /v "AllowTelemetry" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Privacy" /v "TailoredExperiencesWithDiagnosticDataEnabled" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\AdvertisingInfo" /v "DisabledByGroupPolicy" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(TELEMETRY_DEFAULTS),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_services",
        name: "Disable Unnecessary Services",
        tier: Tier::Standard,
        summary: "Stop and disable sync and offline maps services",
        forward: &[
            "sc stop OneSyncSvc",
            "sc config OneSyncSvc start= disabled",
            "sc stop MapsBroker",
            "sc config MapsBroker start= disabled",
        ],
        inverse: Some(&[
            "sc config OneSyncSvc start= demand",
            "sc config MapsBroker start= delayed-auto",
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_indexing",
        name: "Disable Indexing",
        tier: Tier::Standard,
        summary: "Stop and disable Windows Search",
        forward: &["sc stop WSearch", "sc config WSearch start= disabled"],
        inverse: Some(&["sc config WSearch start= auto", "sc start WSearch"]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "set_high_performance",
        name: "Set High Performance",
        tier: Tier::Standard,
        summary: "Activate the High Performance power plan and disable hibernation",
        forward: &[
            "powercfg /setactive 8c5e7fda-e8bf-4a96-9a85-a6e23a8c635c",
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Power" /v "HibernateEnabled" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            "powercfg /setactive 381b4222-f694-41f0-9685-ff5bb260df2e",
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Power" /v "HibernateEnabled" /t REG_DWORD /d 1 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disk_defrag_trim",
        name: "Disk Defrag/Trim",
        tier: Tier::Standard,
        summary: "Optimize and retrim the system drive",
        forward: &[
            "defrag C: /O /U",
            "powershell Optimize-Volume -DriveLetter C -ReTrim -Verbose",
        ],
        inverse: None,
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_timeline",
        name: "Disable Timeline",
        tier: Tier::Standard,
        summary: "Disable the activity feed",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\System" /v "EnableActivityFeed" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\System" /v "EnableActivityFeed" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_location_tracking",
        name: "Disable Location Tracking",
        tier: Tier::Standard,
        summary: "Disable location services by policy",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\LocationAndSensors" /v "DisableLocation" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\LocationAndSensors" /v "DisableLocation" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_system_cache",
        name: "Optimize System Cache",
        tier: Tier::Standard,
        summary: "Favour the file system cache",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "LargeSystemCache" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "LargeSystemCache" /t REG_DWORD /d 0 /f"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "disable_print_spooler",
        name: "Disable Print Spooler",
        tier: Tier::Standard,
        summary: "Stop and disable the print spooler",
        forward: &["sc stop Spooler", "sc config Spooler start= disabled"],
        inverse: Some(&["sc config Spooler start= auto", "sc start Spooler"]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_processor_scheduling",
        name: "Optimize Processor",
        tier: Tier::Standard,
        summary: "Favour foreground programs with short quanta",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\PriorityControl" /v "Win32PrioritySeparation" /t REG_DWORD /d 26 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\PriorityControl" /v "Win32PrioritySeparation" /t REG_DWORD /d 2 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_remote_assistance",
        name: "Disable Remote Assistance",
        tier: Tier::Standard,
        summary: "Refuse Remote Assistance invitations",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Remote Assistance" /v "fAllowToGetHelp" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Remote Assistance" /v "fAllowToGetHelp" /t REG_DWORD /d 1 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "enable_fast_restart",
        name: "Enable Fast Restart",
        tier: Tier::Standard,
        summary: "Shorten service and application shutdown timeouts",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control" /v "WaitToKillServiceTimeout" /t REG_SZ /d "2000" /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Power" /v "HiberbootEnabled" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "HungAppTimeout" /t REG_SZ /d "3000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "2000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "1" /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control" /v "ServicesPipeTimeout" /t REG_DWORD /d 3000 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control" /v "WaitToKillServiceTimeout" /t REG_SZ /d "5000" /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Power" /v "HiberbootEnabled" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "HungAppTimeout" /t REG_SZ /d "5000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "20000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "0" /f"#,
            r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Control" /v "ServicesPipeTimeout" /f"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "enable_fast_signout",
        name: "Enable Fast Signout",
        tier: Tier::Standard,
        summary: "Skip sign-out delays and end hung applications automatically",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Winlogon" /v "ProfileDlgTimeOut" /t REG_DWORD /d 10 /f"#,
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Winlogon" /v "DelayedDesktopSwitchTimeout" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "ClearPageFileAtShutdown" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "2000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "1" /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Winlogon" /v "ProfileDlgTimeOut" /f"#,
            r#"reg delete "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Winlogon" /v "DelayedDesktopSwitchTimeout" /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "ClearPageFileAtShutdown" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "20000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "0" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "clear_session_cookies",
        name: "Clear Session Cookies (FSSO)",
        tier: Tier::Standard,
        summary: "Purge browser sessions, cached credentials and Kerberos tickets",
        forward: &[
            "RunDll32.exe InetCpl.cpl,ClearMyTracksByProcess 255",
            r#"powershell "Remove-Item -Path \"$env:LOCALAPPDATA\Google\Chrome\User Data\Default\Session Storage\" -Recurse -Force -ErrorAction SilentlyContinue""#,
            r#"powershell "Remove-Item -Path \"$env:LOCALAPPDATA\Google\Chrome\User Data\Default\Cookies\" -Force -ErrorAction SilentlyContinue""#,
            r#"powershell "Remove-Item -Path \"$env:APPDATA\Mozilla\Firefox\Profiles\*\cookies.sqlite\" -Force -ErrorAction SilentlyContinue""#,
            r#"powershell "Remove-Item -Path \"$env:APPDATA\Mozilla\Firefox\Profiles\*\sessionstore.js\" -Force -ErrorAction SilentlyContinue""#,
            "cmdkey /delete:WindowsLive",
            "cmdkey /delete:MicrosoftAccount",
            "klist purge",
            "klist -li 0x3e7 purge",
            "ipconfig /flushdns",
            "RunDll32.exe InetCpl.cpl,ClearMyTracksByProcess 8",
        ],
        inverse: None,
        requires_reboot: false,
    },
];

pub(crate) static ULTIMATE: &[TweakDefinition] = &[
    TweakDefinition {
        id: "disable_defender",
        name: "Disable Defender",
        tier: Tier::Ultimate,
        summary: "Disable Microsoft Defender by policy and service",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows Defender" /v "DisableAntiSpyware" /t REG_DWORD /d 1 /f"#,
            "sc stop WinDefend",
            "sc config WinDefend start= disabled",
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows Defender" /v "DisableAntiSpyware" /f"#,
            "sc config WinDefend start= auto",
            "sc start WinDefend",
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "disable_cortana",
        name: "Disable Cortana",
        tier: Tier::Ultimate,
        summary: "Disable Cortana and web results in search",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Search" /v "AllowCortana" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Search" /v "DisableWebSearch" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Search" /v "AllowCortana" /f"#,
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Search" /v "DisableWebSearch" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_xbox_services",
        name: "Disable Xbox Services",
        tier: Tier::Ultimate,
        summary: "Stop and disable Xbox authentication and accessory services",
        forward: &[
            "sc stop XblAuthManager",
            "sc config XblAuthManager start= disabled",
            "sc stop XboxGipSvc",
            "sc config XboxGipSvc start= disabled",
        ],
        inverse: Some(&[
            "sc config XblAuthManager start= demand",
            "sc config XboxGipSvc start= demand",
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "remove_bloat_apps",
        name: "Remove Bloat Apps",
        tier: Tier::Ultimate,
        summary: "Uninstall Xbox, Bing and Zune packages",
        forward: &[
            r#"powershell "Get-AppxPackage *Xbox* | Remove-AppxPackage""#,
            r#"powershell "Get-AppxPackage *Bing* | Remove-AppxPackage""#,
            r#"powershell "Get-AppxPackage *Zune* | Remove-AppxPackage""#,
        ],
        inverse: None,
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_tips_notifications",
        name: "Disable Tips/Notifications",
        tier: Tier::Ultimate,
        summary: "Turn off tips and suggested content",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager" /v "SubscribedContent-338388Enabled" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager" /v "SubscribedContent-353694Enabled" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager" /v "SubscribedContent-338388Enabled" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager" /v "SubscribedContent-353694Enabled" /t REG_DWORD /d 1 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_advertising",
        name: "Disable Advertising",
        tier: Tier::Ultimate,
        summary: "Disable suggested apps and consumer features",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager" /v "SubscribedContent-353696Enabled" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\CloudContent" /v "DisableWindowsConsumerFeatures" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager" /v "SubscribedContent-353696Enabled" /t REG_DWORD /d 1 /f"#,
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\CloudContent" /v "DisableWindowsConsumerFeatures" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_error_reporting",
        name: "Disable Error Reporting",
        tier: Tier::Ultimate,
        summary: "Disable Windows Error Reporting",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Error Reporting" /v "Disabled" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Error Reporting" /v "Disabled" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_smart_screen",
        name: "Disable Smart Screen",
        tier: Tier::Ultimate,
        summary: "Disable SmartScreen for apps and files",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\System" /v "EnableSmartScreen" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\System" /v "EnableSmartScreen" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_feedback",
        name: "Disable Feedback",
        tier: Tier::Ultimate,
        summary: "Stop feedback prompts",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\DataCollection" /v "DoNotShowFeedbackNotifications" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\DataCollection" /v "DoNotShowFeedbackNotifications" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_auto_update",
        name: "Disable Auto Update",
        tier: Tier::Ultimate,
        summary: "Disable automatic Windows Update installs",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU" /v "NoAutoUpdate" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU" /v "NoAutoUpdate" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_onedrive",
        name: "Disable OneDrive",
        tier: Tier::Ultimate,
        summary: "Close OneDrive and disable file sync by policy",
        forward: &[
            "taskkill /f /im OneDrive.exe",
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\OneDrive" /v "DisableFileSyncNGSC" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\OneDrive" /v "DisableFileSyncNGSC" /f"#,
        ]),
        requires_reboot: false,
    },
];

pub(crate) static EXTREME: &[TweakDefinition] = &[
    TweakDefinition {
        id: "optimize_hdd_performance",
        name: "Optimize HDD Performance",
        tier: Tier::Extreme,
        summary: "Disable scheduled defrag, last-access updates and Superfetch",
        forward: &[
            r#"schtasks /change /tn "Microsoft\Windows\Defrag\ScheduledDefrag" /disable"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\FileSystem" /v "NtfsDisableLastAccessUpdate" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management\PrefetchParameters" /v "EnablePrefetcher" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management\PrefetchParameters" /v "EnableSuperfetch" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"schtasks /change /tn "Microsoft\Windows\Defrag\ScheduledDefrag" /enable"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\FileSystem" /v "NtfsDisableLastAccessUpdate" /t REG_DWORD /d 2147483650 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management\PrefetchParameters" /v "EnablePrefetcher" /t REG_DWORD /d 3 /f"#,
            r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management\PrefetchParameters" /v "EnableSuperfetch" /f"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "disable_animations",
        name: "Disable UI Animations",
        tier: Tier::Extreme,
        summary: "Disable list, taskbar and window animations",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "ListviewAlphaSelect" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "TaskbarAnimations" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "ImeSwitchNotification" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Control Panel\Desktop\WindowMetrics" /v "MinAnimate" /t REG_SZ /d "0" /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "ListviewAlphaSelect" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "TaskbarAnimations" /t REG_DWORD /d 1 /f"#,
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "ImeSwitchNotification" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop\WindowMetrics" /v "MinAnimate" /t REG_SZ /d "1" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_login_performance",
        name: "Optimize Login Performance",
        tier: Tier::Extreme,
        summary: "Remove the startup app delay and shorten logoff timeouts",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Winlogon" /v "AutoRestartShell" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Serialize" /v "StartupDelayInMSec" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control" /v "WaitToKillServiceTimeout" /t REG_SZ /d "2000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "1" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "HungAppTimeout" /t REG_SZ /d "3000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "2000" /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Winlogon" /v "AutoRestartShell" /t REG_DWORD /d 1 /f"#,
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Serialize" /v "StartupDelayInMSec" /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control" /v "WaitToKillServiceTimeout" /t REG_SZ /d "5000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "AutoEndTasks" /t REG_SZ /d "0" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "HungAppTimeout" /t REG_SZ /d "5000" /f"#,
            r#"reg add "HKCU\Control Panel\Desktop" /v "WaitToKillAppTimeout" /t REG_SZ /d "20000" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_update_auto_restart",
        name: "Disable Auto-Restart Updates",
        tier: Tier::Extreme,
        summary: "Never reboot for updates while a user is signed in",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU" /v "NoAutoRebootWithLoggedOnUsers" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU" /v "AUPowerManagement" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU" /v "NoAutoRebootWithLoggedOnUsers" /f"#,
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU" /v "AUPowerManagement" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_network_performance",
        name: "Optimize Network Performance",
        tier: Tier::Extreme,
        summary: "Tune TCP window scaling, TTL, autotuning and RSS",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "Tcp1323Opts" /t REG_DWORD /d 1 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "TCPWindowSize" /t REG_DWORD /d 64240 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "DefaultTTL" /t REG_DWORD /d 64 /f"#,
            "netsh int tcp set global autotuninglevel=normal",
            "netsh int tcp set global rss=enabled",
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "Tcp1323Opts" /f"#,
            r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "TCPWindowSize" /f"#,
            r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Services\Tcpip\Parameters" /v "DefaultTTL" /f"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "disable_system_maintenance",
        name: "Disable System Maintenance",
        tier: Tier::Extreme,
        summary: "Disable automatic maintenance",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Schedule\Maintenance" /v "MaintenanceDisabled" /t REG_DWORD /d 1 /f"#,
            r#"schtasks /change /tn "Microsoft\Windows\TaskScheduler\Maintenance Configurator" /disable"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Schedule\Maintenance" /v "MaintenanceDisabled" /f"#,
            r#"schtasks /change /tn "Microsoft\Windows\TaskScheduler\Maintenance Configurator" /enable"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_paging_file",
        name: "Optimize Paging File",
        tier: Tier::Extreme,
        summary: "Use a fixed 2-4GB page file",
        forward: &[
            r#"wmic computersystem where name="%computername%" set AutomaticManagedPagefile=False"#,
            r#"wmic pagefileset where name="C:\\pagefile.sys" set InitialSize=2048,MaximumSize=4096"#,
        ],
        inverse: Some(&[
            r#"wmic computersystem where name="%computername%" set AutomaticManagedPagefile=True"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "disable_search_indexing",
        name: "Disable Search Indexing",
        tier: Tier::Extreme,
        summary: "Disable Windows Search and Outlook indexing",
        forward: &[
            "sc stop WSearch",
            "sc config WSearch start= disabled",
            r#"reg add "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Search" /v "PreventIndexingOutlook" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            "sc config WSearch start= auto",
            "sc start WSearch",
            r#"reg delete "HKLM\SOFTWARE\Policies\Microsoft\Windows\Windows Search" /v "PreventIndexingOutlook" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "cleanup_temp_files",
        name: "Cleanup Temp Files",
        tier: Tier::Extreme,
        summary: "Empty the temp folder and run Disk Cleanup",
        forward: &[
            r#"powershell "Get-ChildItem -Path $env:TEMP -Recurse -Force | Remove-Item -Force -Recurse -ErrorAction SilentlyContinue""#,
            "cleanmgr /sagerun:1",
            "ipconfig /flushdns",
        ],
        inverse: None,
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_system_responsiveness",
        name: "Optimize System Responsiveness",
        tier: Tier::Extreme,
        summary: "Favour foreground responsiveness over multimedia reservations",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\PriorityControl" /v "Win32PrioritySeparation" /t REG_DWORD /d 38 /f"#,
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Multimedia\SystemProfile" /v "SystemResponsiveness" /t REG_DWORD /d 10 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\PriorityControl" /v "Win32PrioritySeparation" /t REG_DWORD /d 2 /f"#,
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Multimedia\SystemProfile" /v "SystemResponsiveness" /t REG_DWORD /d 20 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "disable_visual_effects_advanced",
        name: "Advanced Visual Effects",
        tier: Tier::Extreme,
        summary: "Disable min/max, combo box and list box animations",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "AnimateMinMax" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "ComboBoxAnimation" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "ListBoxSmoothScrolling" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "AnimateMinMax" /f"#,
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "ComboBoxAnimation" /f"#,
            r#"reg delete "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\VisualEffects" /v "ListBoxSmoothScrolling" /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_memory_management",
        name: "Optimize Memory Management",
        tier: Tier::Extreme,
        summary: "Keep kernel code resident and skip page file clearing",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "ClearPageFileAtShutdown" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "DisablePagingExecutive" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "ClearPageFileAtShutdown" /t REG_DWORD /d 0 /f"#,
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "DisablePagingExecutive" /t REG_DWORD /d 0 /f"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "optimize_disk_cache",
        name: "Optimize Disk Cache",
        tier: Tier::Extreme,
        summary: "Let the memory manager size the I/O page lock limit",
        forward: &[
            r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "IoPageLockLimit" /t REG_DWORD /d 0 /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v "IoPageLockLimit" /f"#,
        ]),
        requires_reboot: true,
    },
    TweakDefinition {
        id: "disable_thumbnail_cache",
        name: "Disable Thumbnail Cache",
        tier: Tier::Extreme,
        summary: "Stop caching thumbnails in thumbs.db",
        forward: &[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "DisableThumbnailCache" /t REG_DWORD /d 1 /f"#,
        ],
        inverse: Some(&[
            r#"reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced" /v "DisableThumbnailCache" /t REG_DWORD /d 0 /f"#,
        ]),
        requires_reboot: false,
    },
    TweakDefinition {
        id: "optimize_context_menu",
        name: "Optimize Context Menu",
        tier: Tier::Extreme,
        summary: "Block the Windows 11 context menu handler in favour of the classic menu",
        forward: &[
            r#"reg add "HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Shell Extensions\Blocked" /v "{e2bf9676-5f8f-435c-97eb-11607a5bedf7}" /t REG_SZ /d "" /f"#,
        ],
        inverse: Some(&[
            r#"reg delete "HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Shell Extensions\Blocked" /v "{e2bf9676-5f8f-435c-97eb-11607a5bedf7}" /f"#,
        ]),
        requires_reboot: true,
    },
];
