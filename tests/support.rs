use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Picks the status and body for the nth accepted connection.
pub type Responder = Arc<dyn Fn(usize) -> (u16, String) + Send + Sync>;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a canned inference server that answers every request with the
/// responder's status and JSON body.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_inference_server(responder: Responder) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut hits = 0usize;
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let hit = hits;
                    hits = hits.saturating_add(1);
                    let responder = Arc::clone(&responder);
                    thread::spawn(move || handle_client(stream, hit, &responder));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, hit: usize, responder: &Responder) {
    drop(stream.set_read_timeout(Some(Duration::from_secs(5))));
    if !read_request(&mut stream) {
        return;
    }
    let (status, body) = responder(hit);
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Reads headers plus a Content-Length body so the client never sees the
/// connection drop mid-upload.
fn read_request(stream: &mut TcpStream) -> bool {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];
    loop {
        match stream.read(&mut buffer) {
            Ok(0) => return !data.is_empty(),
            Ok(count) => {
                data.extend_from_slice(buffer.get(..count).unwrap_or_default());
                if request_complete(&data) {
                    return true;
                }
                if data.len() > 1_048_576 {
                    return true;
                }
            }
            Err(_) => return false,
        }
    }
}

fn request_complete(data: &[u8]) -> bool {
    let Some(header_end) = find_subslice(data, b"\r\n\r\n") else {
        return false;
    };
    let body_len = content_length(data.get(..header_end).unwrap_or_default());
    let body_start = header_end.saturating_add(4);
    data.len().saturating_sub(body_start) >= body_len
}

fn content_length(headers: &[u8]) -> usize {
    let text = String::from_utf8_lossy(headers);
    for line in text.lines() {
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            return value.trim().parse().unwrap_or(0);
        }
    }
    0
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Run the `embench` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_embench<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = embench_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run embench failed: {}", err))
}

/// Run the `embench` binary from a specific working directory.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_embench_in<I, S>(dir: &std::path::Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = embench_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run embench failed: {}", err))
}

fn embench_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_embench").map_or_else(
        || Err("CARGO_BIN_EXE_embench missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
