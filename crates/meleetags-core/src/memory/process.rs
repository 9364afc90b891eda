use crate::error::{Error, Result};

use super::{ReadMemory, RemoteAddress};

#[cfg(target_os = "windows")]
use tracing::{debug, trace};
#[cfg(target_os = "windows")]
use windows::Win32::Foundation::{CloseHandle, FALSE, HANDLE};
#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, Module32NextW, PROCESSENTRY32W,
    Process32FirstW, Process32NextW, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32, TH32CS_SNAPPROCESS,
};
#[cfg(target_os = "windows")]
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

/// An open, read-only handle to the emulator process.
///
/// The handle is closed on drop.
pub struct ProcessHandle {
    #[cfg(target_os = "windows")]
    handle: HANDLE,
    pub pid: u32,
    /// Load address of the process's main module
    pub base_address: u64,
}

/// Owns a ToolHelp snapshot for the duration of a walk
#[cfg(target_os = "windows")]
struct Snapshot(HANDLE);

#[cfg(target_os = "windows")]
impl Drop for Snapshot {
    fn drop(&mut self) {
        // SAFETY: the snapshot handle was returned by CreateToolhelp32Snapshot and is closed once.
        let _ = unsafe { CloseHandle(self.0) };
    }
}

#[cfg(target_os = "windows")]
fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

#[cfg(target_os = "windows")]
fn find_process_id(exe_file: &str) -> Result<u32> {
    // SAFETY: plain Win32 call; the returned handle is owned by `Snapshot`.
    let snapshot = Snapshot(
        unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .map_err(|e| Error::ProcessNotFound(format!("{exe_file}: {e}")))?,
    );

    let mut pe = PROCESSENTRY32W {
        dwSize: size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: `pe` is a properly sized PROCESSENTRY32W.
    if unsafe { Process32FirstW(snapshot.0, &mut pe) }.is_err() {
        return Err(Error::ProcessNotFound(exe_file.to_string()));
    }
    loop {
        if wide_to_string(&pe.szExeFile).eq_ignore_ascii_case(exe_file) {
            return Ok(pe.th32ProcessID);
        }
        // SAFETY: as above.
        if unsafe { Process32NextW(snapshot.0, &mut pe) }.is_err() {
            return Err(Error::ProcessNotFound(exe_file.to_string()));
        }
    }
}

#[cfg(target_os = "windows")]
fn find_module_base(pid: u32, module_name: &str) -> Result<u64> {
    // SAFETY: plain Win32 call; the returned handle is owned by `Snapshot`.
    let snapshot = Snapshot(
        unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) }
            .map_err(|e| Error::ProcessOpenFailed(format!("module snapshot for pid {pid}: {e}")))?,
    );

    let mut me = MODULEENTRY32W {
        dwSize: size_of::<MODULEENTRY32W>() as u32,
        ..Default::default()
    };

    let not_found = || Error::ProcessOpenFailed(format!("module {module_name} not found"));

    // SAFETY: `me` is a properly sized MODULEENTRY32W.
    unsafe { Module32FirstW(snapshot.0, &mut me) }.map_err(|_| not_found())?;
    loop {
        if wide_to_string(&me.szModule).eq_ignore_ascii_case(module_name) {
            return Ok(me.modBaseAddr as u64);
        }
        // SAFETY: as above.
        unsafe { Module32NextW(snapshot.0, &mut me) }.map_err(|_| not_found())?;
    }
}

impl ProcessHandle {
    /// Find a running process by executable name and open it for reading.
    #[cfg(target_os = "windows")]
    pub fn find_and_open(exe_file: &str) -> Result<Self> {
        let pid = find_process_id(exe_file)?;
        debug!("Found {} (pid {})", exe_file, pid);

        let base_address = find_module_base(pid, exe_file)?;

        // SAFETY: plain Win32 call; the handle is closed in Drop.
        let handle = unsafe { OpenProcess(PROCESS_VM_READ | PROCESS_QUERY_INFORMATION, FALSE, pid) }
            .map_err(|e| Error::ProcessOpenFailed(format!("{exe_file} (pid {pid}): {e}")))?;

        Ok(Self {
            handle,
            pid,
            base_address,
        })
    }

    #[cfg(not(target_os = "windows"))]
    pub fn find_and_open(exe_file: &str) -> Result<Self> {
        Err(Error::UnsupportedPlatform(format!(
            "cannot attach to {exe_file}: process access requires Windows"
        )))
    }
}

impl ReadMemory for ProcessHandle {
    #[cfg(target_os = "windows")]
    fn read_raw(&self, address: RemoteAddress, buf: &mut [u8]) -> usize {
        let mut transferred: usize = 0;
        // SAFETY: `buf` is valid for `buf.len()` bytes of writes; the remote
        // address is only ever touched by the OS on our behalf.
        let result = unsafe {
            ReadProcessMemory(
                self.handle,
                address.value() as *const _,
                buf.as_mut_ptr().cast(),
                buf.len(),
                Some(&mut transferred as *mut usize),
            )
        };
        if let Err(e) = result {
            trace!("ReadProcessMemory at {} failed: {}", address, e);
        }
        transferred
    }

    #[cfg(not(target_os = "windows"))]
    fn read_raw(&self, _address: RemoteAddress, _buf: &mut [u8]) -> usize {
        0
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from OpenProcess and is closed exactly once.
        let _ = unsafe { CloseHandle(self.handle) };
    }
}
