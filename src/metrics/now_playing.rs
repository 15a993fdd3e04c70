use super::SensorError;

/// An audio session as reported by the OS mixer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSession {
    pub name: String,
    pub muted: bool,
}

pub trait NowPlayingSource: Send {
    fn sessions(&self) -> Result<Vec<AudioSession>, SensorError>;
}

/// Best-effort guess at the current song: the first unmuted, named session
/// other than the system sounds. Any unmuted application qualifies, not only
/// media players.
pub fn pick_now_playing(sessions: &[AudioSession]) -> Option<String> {
    sessions
        .iter()
        .find(|s| !s.muted && !s.name.trim().is_empty() && !s.name.contains("System Sounds"))
        .map(|s| s.name.clone())
}

/// Audio sessions of the default render endpoint.
pub struct SystemAudioSessions;

#[cfg(target_os = "windows")]
impl NowPlayingSource for SystemAudioSessions {
    fn sessions(&self) -> Result<Vec<AudioSession>, SensorError> {
        use sysinfo::{ProcessesToUpdate, System};
        use windows::core::Interface;
        use windows::Win32::Media::Audio::{
            eMultimedia, eRender, IAudioSessionControl2, IAudioSessionManager2,
            IMMDeviceEnumerator, ISimpleAudioVolume, MMDeviceEnumerator,
        };
        use windows::Win32::System::Com::{
            CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
        };

        let unavailable = |_| SensorError::Unavailable("audio sessions");
        let mut entries = Vec::new();
        unsafe {
            let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);
            let result = (|| -> Result<(), SensorError> {
                let enm: IMMDeviceEnumerator =
                    CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL).map_err(unavailable)?;
                let device = enm
                    .GetDefaultAudioEndpoint(eRender, eMultimedia)
                    .map_err(unavailable)?;
                let manager = device
                    .Activate::<IAudioSessionManager2>(CLSCTX_ALL, None)
                    .map_err(unavailable)?;
                let list = manager.GetSessionEnumerator().map_err(unavailable)?;
                let count = list.GetCount().unwrap_or(0);
                let mut sys = System::new();
                sys.refresh_processes(ProcessesToUpdate::All, true);
                for i in 0..count {
                    let Ok(ctrl) = list.GetSession(i) else { continue };
                    let Ok(c2) = ctrl.cast::<IAudioSessionControl2>() else { continue };
                    let Ok(pid) = c2.GetProcessId() else { continue };
                    let Ok(vol) = ctrl.cast::<ISimpleAudioVolume>() else { continue };
                    let muted = vol.GetMute().map(|m| m.as_bool()).unwrap_or(false);
                    let name = if pid == 0 {
                        "System Sounds".to_string()
                    } else {
                        sys.process(sysinfo::Pid::from_u32(pid))
                            .map(|p| p.name().to_string_lossy().to_string())
                            .unwrap_or_default()
                    };
                    entries.push(AudioSession { name, muted });
                }
                Ok(())
            })();
            CoUninitialize();
            result?;
        }
        Ok(entries)
    }
}

#[cfg(not(target_os = "windows"))]
impl NowPlayingSource for SystemAudioSessions {
    fn sessions(&self) -> Result<Vec<AudioSession>, SensorError> {
        Err(SensorError::Unsupported("audio session enumeration"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, muted: bool) -> AudioSession {
        AudioSession {
            name: name.into(),
            muted,
        }
    }

    #[test]
    fn skips_muted_unnamed_and_system_sessions() {
        let sessions = vec![
            session("System Sounds", false),
            session("chrome.exe", true),
            session("", false),
            session("Spotify.exe", false),
            session("vlc.exe", false),
        ];
        assert_eq!(pick_now_playing(&sessions).as_deref(), Some("Spotify.exe"));
    }

    #[test]
    fn nothing_qualifies() {
        assert_eq!(pick_now_playing(&[session("System Sounds", false)]), None);
        assert_eq!(pick_now_playing(&[]), None);
    }
}
