// Win32 implementations of the platform traits plus the GDI capture
// engine and window-targeted delivery.

#[cfg(target_os = "windows")]
pub mod capture;

#[cfg(target_os = "windows")]
pub mod dpi;

#[cfg(target_os = "windows")]
pub mod input;

#[cfg(target_os = "windows")]
pub mod screen;

#[cfg(target_os = "windows")]
pub mod window;
