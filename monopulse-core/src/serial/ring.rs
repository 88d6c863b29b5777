//! Interrupt-fed receive ring
//!
//! Single producer (receive interrupt), single consumer (foreground). The
//! producer owns `tail`, the consumer owns `head`; both are free-running
//! counters and the slot is the counter modulo the capacity. The producer
//! never checks for space: when more than `N` bytes are unread the consumer
//! skips forward, so only the newest `N` bytes survive.

use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;
use portable_atomic::{AtomicU8, AtomicUsize, Ordering};

/// Receive ring capacity of the serial console
pub const RX_CAPACITY: usize = 16;

/// Fixed-capacity byte ring; `N` must be a power of two
pub struct SerialRing<const N: usize> {
    buf: [AtomicU8; N],
    head: AtomicUsize,
    tail: AtomicUsize,
    rx_waker: AtomicWaker,
}

impl<const N: usize> Default for SerialRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SerialRing<N> {
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "ring capacity must be a power of two");
        const EMPTY: AtomicU8 = AtomicU8::new(0);
        Self {
            buf: [EMPTY; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            rx_waker: AtomicWaker::new(),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Store a received byte; called from the receive interrupt only
    pub fn push(&self, byte: u8) {
        let tail = self.tail.load(Ordering::Relaxed);
        self.buf[tail % N].store(byte, Ordering::Relaxed);
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        self.rx_waker.wake();
    }

    /// Check if unread bytes are pending
    pub fn received(&self) -> bool {
        self.head.load(Ordering::Relaxed) != self.tail.load(Ordering::Acquire)
    }

    /// Number of readable bytes, at most `N`
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        tail.wrapping_sub(head).min(N)
    }

    pub fn is_empty(&self) -> bool {
        !self.received()
    }

    /// Take the oldest readable byte without waiting
    pub fn try_read(&self) -> Option<u8> {
        let mut head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }
        if tail.wrapping_sub(head) > N {
            head = tail.wrapping_sub(N);
        }
        let byte = self.buf[head % N].load(Ordering::Relaxed);
        self.head.store(head.wrapping_add(1), Ordering::Release);
        Some(byte)
    }

    /// Spin until a byte is available and take it
    pub fn read_byte(&self) -> u8 {
        loop {
            if let Some(byte) = self.try_read() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    /// Wait until a byte is available and take it
    pub async fn read_byte_async(&self) -> u8 {
        poll_fn(|cx| {
            self.rx_waker.register(cx.waker());
            match self.try_read() {
                Some(byte) => Poll::Ready(byte),
                None => Poll::Pending,
            }
        })
        .await
    }

    /// Discard everything unread
    pub fn flush(&self) {
        critical_section::with(|_| {
            self.head.store(0, Ordering::Relaxed);
            self.tail.store(0, Ordering::Relaxed);
        });
    }
}
