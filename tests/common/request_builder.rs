//! Fluent builder for copy requests in tests

use robowrap::{CopyRequest, InterPacketGap, ThreadCount};
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Builder for test requests with fluent API
pub struct RequestBuilder {
    request: CopyRequest,
}

#[allow(dead_code)]
impl RequestBuilder {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            request: CopyRequest::new(source, destination),
        }
    }

    pub fn move_files(mut self, enabled: bool) -> Self {
        self.request.move_files = enabled;
        self
    }

    pub fn mirror(mut self, enabled: bool) -> Self {
        self.request.mirror = enabled;
        self
    }

    pub fn keep_timestamps(mut self, enabled: bool) -> Self {
        self.request.keep_timestamps = enabled;
        self
    }

    pub fn threads(mut self, n: u8) -> Self {
        self.request.threads = ThreadCount::new(n).expect("valid thread count");
        self
    }

    pub fn throughput(mut self, mb: u32) -> Self {
        self.request.throughput_mb = NonZeroU32::new(mb);
        self
    }

    pub fn ipg(mut self, millis: u32) -> Self {
        self.request.inter_packet_gap = InterPacketGap(millis);
        self
    }

    pub fn restartable(mut self, enabled: bool) -> Self {
        self.request.restartable = enabled;
        self
    }

    pub fn huge_files(mut self, enabled: bool) -> Self {
        self.request.huge_files = enabled;
        self
    }

    pub fn build(self) -> CopyRequest {
        self.request
    }
}
