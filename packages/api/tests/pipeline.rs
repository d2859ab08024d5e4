//! Response pipeline tests
//!
//! Exercises send/fetch end to end against replayed and closure transports.

use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::{HeaderMap, StatusCode};
use reqflow::{Builder, BoxError, ErrorContext, Kind, Request, Response};
use reqflow_client::handler::from_fn;
use reqflow_client::replay_string;
use serde::Deserialize;

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    fn init_logging() {
        env_logger::try_init().ok();
    }

    /// Body reader that counts how often it is dropped.
    struct CountedBody {
        inner: io::Cursor<&'static str>,
        drops: Arc<AtomicUsize>,
    }

    impl Read for CountedBody {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for CountedBody {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counted(status: StatusCode, body: &'static str, drops: Arc<AtomicUsize>) -> Builder {
        reqflow::url("https://example.com/").transport(
            move |_req: &mut Request| -> Result<Response, BoxError> {
                Ok(Response::new(
                    status,
                    HeaderMap::new(),
                    CountedBody {
                        inner: io::Cursor::new(body),
                        drops: Arc::clone(&drops),
                    },
                ))
            },
        )
    }

    #[test]
    fn test_default_validator_accepts_2xx() {
        init_logging();
        let result = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 204 No Content\r\n\r\n"))
            .fetch();
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_validator_rejects_404_with_preview() {
        init_logging();
        let err = reqflow::url("https://example.com/missing")
            .transport(replay_string("HTTP/1.1 404 Not Found\r\n\r\nno such page"))
            .fetch()
            .unwrap_err();

        assert!(err.is_validator());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.to_string().ends_with("unexpected status: 404 Not Found: no such page"));
        assert_eq!(err.url().unwrap().as_str(), "https://example.com/missing");
    }

    #[test]
    fn test_custom_validators_replace_the_default() {
        let result = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 404 Not Found\r\n\r\n"))
            .check_status([StatusCode::NOT_FOUND])
            .fetch();
        assert!(result.is_ok());
    }

    #[test]
    fn test_validators_short_circuit_before_the_handler() {
        let handled = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let (handled_in, second_in) = (Arc::clone(&handled), Arc::clone(&second));

        let err = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<p>"))
            .check_content_type(["application/json"])
            .add_validator(from_fn(move |_res| {
                second_in.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .handle(from_fn(move |_res| {
                handled_in.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .fetch()
            .unwrap_err();

        assert!(err.is_validator());
        assert_eq!(second.load(Ordering::SeqCst), 0);
        assert_eq!(handled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_failure_is_a_handler_error() {
        let sink = Arc::new(Mutex::new(serde_json::Value::Null));
        let err = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 200 OK\r\n\r\nnot json"))
            .to_json(sink)
            .fetch()
            .unwrap_err();
        assert!(err.is_handler());
        assert_eq!(err.kind(), Kind::Handler);
    }

    #[test]
    fn test_json_round_trip_through_the_sink() {
        #[derive(Debug, Default, Deserialize)]
        struct Repo {
            name: String,
            stars: u32,
        }

        let sink = Arc::new(Mutex::new(Repo::default()));
        reqflow::url("https://api.example.com/repos/reqflow")
            .transport(replay_string(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"name\":\"reqflow\",\"stars\":7}",
            ))
            .check_content_type(["application/json"])
            .to_json(Arc::clone(&sink))
            .fetch()
            .unwrap();

        let repo = sink.lock().unwrap();
        assert_eq!(repo.name, "reqflow");
        assert_eq!(repo.stars, 7);
    }

    #[test]
    fn test_chunked_recordings_reach_the_handler_decoded() {
        let sink = Arc::new(Mutex::new(String::new()));
        reqflow::url("https://example.com/stream")
            .transport(replay_string(
                "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n",
            ))
            .to_string(Arc::clone(&sink))
            .fetch()
            .unwrap();

        assert_eq!(*sink.lock().unwrap(), "hello");
    }

    #[test]
    fn test_peek_and_copy_headers_leave_the_body_for_the_handler() {
        let headers = Arc::new(Mutex::new(HeaderMap::new()));
        let peeked = Arc::new(Mutex::new(Vec::new()));
        let body = Arc::new(Mutex::new(Vec::new()));
        let peeked_in = Arc::clone(&peeked);

        reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 200 OK\r\nETag: \"v1\"\r\n\r\n%PDF-1.7 rest"))
            .copy_headers(Arc::clone(&headers))
            .peek(4, move |prefix| {
                peeked_in.lock().unwrap().extend_from_slice(prefix);
                Ok(())
            })
            .to_bytes(Arc::clone(&body))
            .fetch()
            .unwrap();

        assert_eq!(headers.lock().unwrap()["etag"], "\"v1\"");
        assert_eq!(*peeked.lock().unwrap(), b"%PDF");
        assert_eq!(*body.lock().unwrap(), b"%PDF-1.7 rest");
    }

    #[test]
    fn test_connect_failure_is_tagged_and_carries_the_request() {
        let seen_request = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen_request);

        let err = reqflow::url("https://unreachable.example/")
            .transport(|_req: &mut Request| -> Result<Response, BoxError> {
                Err(Box::new(io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed")))
            })
            .on_error(move |ctx: &mut ErrorContext<'_>| {
                *seen_in.lock().unwrap() = ctx.request.map(|r| r.url().to_string());
                assert!(ctx.response.is_none());
            })
            .fetch()
            .unwrap_err();

        assert!(err.is_connect());
        assert!(err.is_timeout());
        assert_eq!(
            seen_request.lock().unwrap().as_deref(),
            Some("https://unreachable.example/")
        );
    }

    #[test]
    fn test_interceptors_run_in_reverse_and_the_first_registered_wins() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let (a_order, b_order) = (Arc::clone(&order), Arc::clone(&order));

        let err = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 500 Internal Server Error\r\n\r\n"))
            .on_error(move |ctx| {
                a_order.lock().unwrap().push("a");
                assert_eq!(ctx.error.as_ref().unwrap().to_string(), "error building request: b");
                ctx.error = Some(reqflow_client::error::handler("a"));
            })
            .on_error(move |ctx| {
                b_order.lock().unwrap().push("b");
                assert!(ctx.is(Kind::Validator));
                assert_eq!(ctx.response.unwrap().status(), StatusCode::INTERNAL_SERVER_ERROR);
                ctx.error = Some(reqflow_client::error::request("b"));
            })
            .fetch()
            .unwrap_err();

        assert_eq!(*order.lock().unwrap(), ["b", "a"]);
        assert_eq!(err.to_string(), "error handling response: a");
    }

    #[test]
    fn test_cleared_errors_report_success() {
        let result = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 503 Service Unavailable\r\n\r\n"))
            .on_error(|ctx| {
                if ctx.is(Kind::Validator) {
                    ctx.error = None;
                }
            })
            .fetch();
        assert!(result.is_ok());
    }

    #[test]
    fn test_cleared_construction_error_sends_nothing() {
        let sent = Arc::new(AtomicUsize::new(0));
        let sent_in = Arc::clone(&sent);

        let result = reqflow::url("https://example.com/")
            .method("NOT A METHOD")
            .transport(move |_req: &mut Request| -> Result<Response, BoxError> {
                sent_in.fetch_add(1, Ordering::SeqCst);
                Ok(Response::new(StatusCode::OK, HeaderMap::new(), io::empty()))
            })
            .on_error(|ctx| ctx.error = None)
            .fetch();

        assert!(result.is_ok());
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_response_body_released_once_on_every_path() {
        let failing = from_fn(|_res| Err("handler refused".into()));

        let cases: Vec<(StatusCode, Option<reqflow::Handler>, bool)> = vec![
            (StatusCode::OK, None, true),
            (StatusCode::NOT_FOUND, None, false),
            (StatusCode::OK, Some(failing.clone()), false),
            (StatusCode::NOT_FOUND, Some(failing), false),
        ];

        for (status, handler, should_succeed) in cases {
            let drops = Arc::new(AtomicUsize::new(0));
            let mut builder = counted(status, "payload", Arc::clone(&drops));
            if let Some(handler) = handler {
                builder = builder.handle(handler);
            }

            let result = builder.fetch();
            assert_eq!(result.is_ok(), should_succeed, "status {status}");
            assert_eq!(drops.load(Ordering::SeqCst), 1, "status {status}");
        }
    }

    #[test]
    fn test_body_is_sent_and_method_inferred() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen);

        reqflow::url("https://example.com/items")
            .body_json(serde_json::json!({"id": 1}))
            .transport(move |req: &mut Request| -> Result<Response, BoxError> {
                let mut body = String::new();
                if let Some(mut stream) = req.body_stream()? {
                    stream.read_to_string(&mut body)?;
                }
                *seen_in.lock().unwrap() = Some((req.method().clone(), body));
                Ok(Response::new(StatusCode::CREATED, HeaderMap::new(), io::empty()))
            })
            .fetch()
            .unwrap();

        let (method, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(method, http::Method::POST);
        assert_eq!(body, r#"{"id":1}"#);
    }

    #[test]
    fn test_send_accepts_a_prebuilt_request() {
        let builder = reqflow::url("https://example.com/")
            .transport(replay_string("HTTP/1.1 200 OK\r\n\r\n"));
        let mut req = builder.request().unwrap().unwrap();
        req.headers_mut().insert("x-extra", "1".parse().unwrap());
        assert!(builder.send(&mut req).is_ok());
    }
}
