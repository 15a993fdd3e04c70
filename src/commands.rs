use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Requests posted by background listeners to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudCommand {
    Toggle,
    Reload,
    Exit,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Cloneable sending half handed to the hotkey and tray threads.
///
/// Every send also invokes the optional waker so an idle UI loop picks the
/// command up without waiting for its next scheduled frame. Once the shared
/// stop flag is raised further commands are dropped.
#[derive(Clone)]
pub struct CommandSender {
    tx: Sender<HudCommand>,
    waker: Option<Waker>,
    stop: Arc<AtomicBool>,
}

impl CommandSender {
    pub fn send(&self, cmd: HudCommand) -> bool {
        if self.stop.load(Ordering::SeqCst) {
            tracing::debug!(?cmd, "listeners stopped; dropping command");
            return false;
        }
        if self.tx.send(cmd).is_err() {
            tracing::debug!(?cmd, "ui loop gone; dropping command");
            return false;
        }
        if let Some(wake) = &self.waker {
            wake();
        }
        true
    }

    pub fn with_waker(mut self, wake: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(wake));
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

/// Receiving half owned by the UI loop.
pub struct CommandQueue {
    rx: Receiver<HudCommand>,
    stop: Arc<AtomicBool>,
}

impl CommandQueue {
    /// Pending commands in arrival order, without blocking.
    pub fn drain(&self) -> Vec<HudCommand> {
        self.rx.try_iter().collect()
    }

    /// Tell every listener holding a [`CommandSender`] to stop forwarding.
    pub fn stop_listeners(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }
}

pub fn command_channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = channel();
    let stop = Arc::new(AtomicBool::new(false));
    (
        CommandSender {
            tx,
            waker: None,
            stop: stop.clone(),
        },
        CommandQueue { rx, stop },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn commands_arrive_in_order_and_wake() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let (tx, queue) = command_channel();
        let tx = tx.with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let remote = tx.clone();
        std::thread::spawn(move || {
            remote.send(HudCommand::Toggle);
            remote.send(HudCommand::Exit);
        })
        .join()
        .unwrap();
        assert_eq!(queue.drain(), vec![HudCommand::Toggle, HudCommand::Exit]);
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn stopped_listeners_drop_commands() {
        let (tx, queue) = command_channel();
        queue.stop_listeners();
        assert!(tx.is_stopped());
        assert!(!tx.send(HudCommand::Toggle));
        assert!(queue.drain().is_empty());
    }
}
