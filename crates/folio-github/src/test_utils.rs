use std::{
    io::{BufRead, BufReader, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

/// One-shot HTTP responder bound to a loopback port.
///
/// Answers the first connection with a canned response and hands back the
/// request head it received, lowercased.
pub struct LoopbackServer {
    pub base: String,
    handle: JoinHandle<String>,
}

impl LoopbackServer {
    pub fn respond(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: \
             {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            loop {
                let mut line = String::new();
                let read = reader.read_line(&mut line).unwrap();
                if read == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }

            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            head.to_ascii_lowercase()
        });

        Self {
            base: format!("http://{addr}"),
            handle,
        }
    }

    /// Waits for the exchange to finish and returns the request head.
    pub fn request_head(self) -> String {
        self.handle.join().unwrap()
    }
}
