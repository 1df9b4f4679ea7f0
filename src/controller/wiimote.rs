//! # Wii Remote Module
//!
//! Discovers Wii Remotes through sysfs and reads them through the Linux
//! hid-wiimote driver.
//!
//! ## Controller Detection
//!
//! A remote is a HID device under `/sys/bus/hid/devices` named
//! `BUS:VENDOR:PRODUCT.INSTANCE` with:
//! - Vendor ID: 0x057E (Nintendo)
//! - Product ID: 0x0306 (original remote) or 0x0330 (Remote Plus)
//!
//! The driver splits the remote into one evdev device per interface (core
//! buttons, accelerometer, IR, Motion Plus, extension). Each one shows up
//! under `<hid device>/input/inputN/` with a `name` file and an `eventM`
//! directory naming its `/dev/input/eventM` node.
//!
//! ## Reading
//!
//! Every open interface gets a reader task on the current runtime. Readers
//! translate events with an [`EventMapper`] and queue them on one channel,
//! which [`WiimoteController::next_item`](ControllerChannel::next_item)
//! drains in arrival order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use evdev::{Device, EventStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::event::{AxisSample, AxisTriple, ControllerEvent, ControllerItem};
use super::mapper::{EventMapper, Interface};
use super::motion_plus::{MpCalibration, MpNormalization};
use super::{ControllerChannel, ControllerStatus};
use crate::error::{PointerBridgeError, Result};

/// Nintendo vendor ID
pub const NINTENDO_VENDOR_ID: u16 = 0x057E;

/// Wii Remote product IDs (original and Remote Plus)
pub const WIIMOTE_PRODUCT_IDS: &[u16] = &[0x0306, 0x0330];

/// Default sysfs directory holding HID devices
pub const DEFAULT_HID_ROOT: &str = "/sys/bus/hid/devices";

/// Default directory holding evdev nodes
pub const DEFAULT_DEV_ROOT: &str = "/dev/input";

/// `errno` reported by evdev reads once the device is unplugged
const ENODEV: i32 = 19;

/// Queued readings between the interface readers and the dispatch loop
const READING_QUEUE_DEPTH: usize = 64;

/// One evdev interface found under a remote's sysfs node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceNode {
    pub interface: Interface,
    pub devnode: PathBuf,
}

/// Returns true if a HID device directory name belongs to a Wii Remote
///
/// # Examples
///
/// ```
/// use wiimote_pointer::controller::wiimote::is_wiimote_hid_name;
///
/// assert!(is_wiimote_hid_name("0005:057E:0306.0001"));
/// assert!(is_wiimote_hid_name("0005:057E:0330.000A"));
/// assert!(!is_wiimote_hid_name("0003:046D:C52B.0002"));
/// ```
#[must_use]
pub fn is_wiimote_hid_name(name: &str) -> bool {
    let mut parts = name.split(':');
    let (Some(_bus), Some(vendor), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let product = rest.split('.').next().unwrap_or_default();

    match (u16::from_str_radix(vendor, 16), u16::from_str_radix(product, 16)) {
        (Ok(vendor), Ok(product)) => {
            vendor == NINTENDO_VENDOR_ID && WIIMOTE_PRODUCT_IDS.contains(&product)
        }
        _ => false,
    }
}

/// List the sysfs nodes of all connected remotes, sorted by path
///
/// A missing HID root means no remotes.
///
/// # Errors
///
/// Returns `Controller` if the HID root exists but cannot be read.
pub fn list_remotes<A: AsRef<Path>>(hid_root: A) -> Result<Vec<PathBuf>> {
    let hid_root = hid_root.as_ref();
    let entries = match fs::read_dir(hid_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(PointerBridgeError::Controller(format!(
                "Failed to read {}: {}",
                hid_root.display(),
                e
            )))
        }
    };

    let mut remotes: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_wiimote_hid_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();

    // Sort for deterministic index selection when several remotes are connected
    remotes.sort();
    Ok(remotes)
}

/// Resolve a controller selector to a remote's sysfs node
///
/// A bare number selects the N-th remote (1-based) from [`list_remotes`].
/// Anything else is taken as a sysfs path. When that path is gone but names
/// a remote, the first connected remote of the same `BUS:VENDOR:PRODUCT`
/// under `hid_root` is used instead, since the HID bus hands a reconnected
/// device a new instance number.
///
/// # Errors
///
/// Returns `ControllerNotFound` if the index is out of range or no matching
/// remote exists.
pub fn resolve_remote<A: AsRef<Path>>(hid_root: A, selector: &str) -> Result<PathBuf> {
    if let Ok(index) = selector.trim().parse::<usize>() {
        let remotes = list_remotes(hid_root)?;
        return index
            .checked_sub(1)
            .and_then(|i| remotes.get(i))
            .cloned()
            .ok_or_else(|| {
                PointerBridgeError::ControllerNotFound(format!(
                    "no remote #{} ({} connected)",
                    index,
                    remotes.len()
                ))
            });
    }

    let path = PathBuf::from(selector);
    if path.exists() {
        return Ok(path);
    }

    let wanted = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| is_wiimote_hid_name(name));
    if let Some(wanted) = wanted.as_deref().and_then(hid_model) {
        let renamed = list_remotes(hid_root)?.into_iter().find(|remote| {
            remote
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .and_then(|name| hid_model(&name).map(|model| model.eq_ignore_ascii_case(wanted)))
                .unwrap_or(false)
        });
        if let Some(remote) = renamed {
            debug!("{} is now {}", selector, remote.display());
            return Ok(remote);
        }
    }

    Err(PointerBridgeError::ControllerNotFound(selector.to_string()))
}

/// `BUS:VENDOR:PRODUCT` part of a HID device name
fn hid_model(name: &str) -> Option<&str> {
    name.split_once('.').map(|(model, _)| model)
}

/// Where to look for a remote, and which one
///
/// Re-resolves the selector on every lookup so that a remote that left and
/// came back under a new sysfs node is found again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocator {
    hid_root: PathBuf,
    dev_root: PathBuf,
    selector: String,
}

impl RemoteLocator {
    /// Locator over the system HID and evdev directories
    pub fn new<S: Into<String>>(selector: S) -> Self {
        Self::with_roots(DEFAULT_HID_ROOT, DEFAULT_DEV_ROOT, selector)
    }

    pub fn with_roots<A, B, S>(hid_root: A, dev_root: B, selector: S) -> Self
    where
        A: Into<PathBuf>,
        B: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            hid_root: hid_root.into(),
            dev_root: dev_root.into(),
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Current sysfs node of the selected remote
    ///
    /// # Errors
    ///
    /// See [`resolve_remote`].
    pub fn resolve(&self) -> Result<PathBuf> {
        resolve_remote(&self.hid_root, &self.selector)
    }

    /// Current sysfs node of the selected remote and its interfaces
    ///
    /// # Errors
    ///
    /// Fails if the remote cannot be resolved or its interfaces cannot be read.
    pub fn scan(&self) -> Result<(PathBuf, Vec<InterfaceNode>)> {
        let syspath = self.resolve()?;
        let nodes = scan_interfaces(&syspath, &self.dev_root)?;
        Ok((syspath, nodes))
    }
}

/// Find the evdev interfaces currently exposed by a remote
///
/// Input devices with names that are not Wii Remote interfaces are skipped.
/// The result is sorted by device node.
///
/// # Errors
///
/// Returns `Controller` if the remote's `input` directory cannot be read,
/// which is the case once the remote is gone.
pub fn scan_interfaces(syspath: &Path, dev_root: &Path) -> Result<Vec<InterfaceNode>> {
    let input_dir = syspath.join("input");
    let entries = fs::read_dir(&input_dir).map_err(|e| {
        PointerBridgeError::Controller(format!("Failed to read {}: {}", input_dir.display(), e))
    })?;

    let mut nodes = Vec::new();
    for entry in entries.filter_map(|entry| entry.ok()) {
        let input_path = entry.path();
        let Ok(name) = fs::read_to_string(input_path.join("name")) else {
            continue;
        };
        let Some(interface) = Interface::from_device_name(name.trim()) else {
            debug!("Skipping unknown input device: {}", name.trim());
            continue;
        };
        if let Some(event_name) = event_node_name(&input_path) {
            nodes.push(InterfaceNode {
                interface,
                devnode: dev_root.join(event_name),
            });
        }
    }

    nodes.sort_by(|a, b| a.devnode.cmp(&b.devnode));
    Ok(nodes)
}

fn event_node_name(input_path: &Path) -> Option<String> {
    fs::read_dir(input_path)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .find(|name| name.starts_with("event"))
}

/// Read battery charge and player LEDs from a remote's sysfs node
///
/// Missing attributes are reported as `None`.
#[must_use]
pub fn read_status(syspath: &Path) -> ControllerStatus {
    let battery = fs::read_dir(syspath.join("power_supply"))
        .ok()
        .and_then(|mut entries| entries.find_map(|entry| entry.ok()))
        .and_then(|supply| fs::read_to_string(supply.path().join("capacity")).ok())
        .and_then(|capacity| capacity.trim().parse::<u8>().ok());

    let mut leds = [None; 4];
    if let Ok(entries) = fs::read_dir(syspath.join("leds")) {
        for entry in entries.filter_map(|entry| entry.ok()) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(index) = name
                .rsplit_once(":p")
                .and_then(|(_, n)| n.parse::<usize>().ok())
                .filter(|n| *n < leds.len())
            else {
                continue;
            };
            leds[index] = fs::read_to_string(entry.path().join("brightness"))
                .ok()
                .and_then(|value| value.trim().parse::<u32>().ok())
                .map(|brightness| brightness > 0);
        }
    }

    ControllerStatus { battery, leds }
}

/// Item queued by an interface reader
#[derive(Debug)]
enum Reading {
    Event(ControllerEvent),
    Gone,
    Failed(io::Error),
}

/// Connected Wii Remote
///
/// Owns one reader task per open interface and the Motion-Plus
/// normalization offsets. Readers are aborted on reopen and on drop.
pub struct WiimoteController {
    locator: RemoteLocator,
    syspath: PathBuf,
    sender: mpsc::Sender<Reading>,
    readings: mpsc::Receiver<Reading>,
    readers: Vec<JoinHandle<()>>,
    interfaces: Vec<InterfaceNode>,
    /// Offsets in hundredths of a raw unit
    mp_offsets: [i64; 3],
    mp_factor: i32,
}

impl std::fmt::Debug for WiimoteController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WiimoteController")
            .field("selector", &self.locator.selector())
            .field("syspath", &self.syspath)
            .field("interfaces", &self.interfaces)
            .finish_non_exhaustive()
    }
}

impl WiimoteController {
    /// Open every interface of the remote picked by `selector`
    ///
    /// The selector is a sysfs HID path or a 1-based index, as accepted by
    /// [`resolve_remote`]. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no such remote, or it exposes no core interface
    /// - `DeviceOpen`: the core interface cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wiimote_pointer::controller::wiimote::WiimoteController;
    ///
    /// # async fn run() -> wiimote_pointer::error::Result<()> {
    /// let controller = WiimoteController::open("1")?;
    /// println!("Opened {} interfaces", controller.interfaces().len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(selector: &str) -> Result<Self> {
        Self::open_with(RemoteLocator::new(selector))
    }

    /// Open the remote found by a custom locator
    pub fn open_with(locator: RemoteLocator) -> Result<Self> {
        let mut controller = Self::detached(locator);
        controller.reopen()?;
        Ok(controller)
    }

    fn detached(locator: RemoteLocator) -> Self {
        let (sender, readings) = mpsc::channel(READING_QUEUE_DEPTH);
        Self {
            locator,
            syspath: PathBuf::new(),
            sender,
            readings,
            readers: Vec::new(),
            interfaces: Vec::new(),
            mp_offsets: [0; 3],
            mp_factor: 0,
        }
    }

    /// Sysfs node the remote was last opened at
    pub fn syspath(&self) -> &Path {
        &self.syspath
    }

    /// Interfaces opened by the last (re)open
    pub fn interfaces(&self) -> &[InterfaceNode] {
        &self.interfaces
    }

    fn stop_readers(&mut self) {
        for reader in self.readers.drain(..) {
            reader.abort();
        }
        self.interfaces.clear();
    }

    fn spawn_reader(&mut self, node: &InterfaceNode) -> io::Result<()> {
        let stream = Device::open(&node.devnode)?.into_event_stream()?;
        let mapper = EventMapper::new(node.interface);
        let sender = self.sender.clone();
        self.readers.push(tokio::spawn(read_interface(stream, mapper, sender)));
        Ok(())
    }

    fn normalize_motion_plus(&mut self, sample: AxisSample) -> AxisSample {
        let raw = sample.primary();
        let mut adjusted = [raw.x, raw.y, raw.z];
        for (value, offset) in adjusted.iter_mut().zip(self.mp_offsets.iter_mut()) {
            let centered = i64::from(*value) - *offset / 100;
            *value = centered.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            // A non-zero factor lets the offsets drift toward the resting rate
            if self.mp_factor != 0 {
                let step = i64::from(self.mp_factor);
                *offset += if centered < 0 { -step } else { step };
            }
        }

        let mut triples = sample.triples().to_vec();
        if let Some(first) = triples.first_mut() {
            *first = AxisTriple::new(adjusted[0], adjusted[1], adjusted[2]);
        }
        AxisSample::from_triples(&triples)
    }
}

impl Drop for WiimoteController {
    fn drop(&mut self) {
        self.stop_readers();
        debug!("Closed remote {}", self.syspath.display());
    }
}

impl MpCalibration for WiimoteController {
    fn mp_normalization(&self) -> MpNormalization {
        let unit = |offset: i64| (offset / 100).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        MpNormalization {
            x: unit(self.mp_offsets[0]),
            y: unit(self.mp_offsets[1]),
            z: unit(self.mp_offsets[2]),
            factor: self.mp_factor,
        }
    }

    fn set_mp_normalization(&mut self, normalization: MpNormalization) {
        self.mp_offsets = [
            i64::from(normalization.x) * 100,
            i64::from(normalization.y) * 100,
            i64::from(normalization.z) * 100,
        ];
        self.mp_factor = normalization.factor;
        debug!("Motion Plus normalization set to {:?}", normalization);
    }
}

#[async_trait]
impl ControllerChannel for WiimoteController {
    async fn next_item(&mut self) -> io::Result<ControllerItem> {
        // `recv` is cancel-safe and everything after it is synchronous
        match self.readings.recv().await {
            Some(Reading::Event(ControllerEvent::MotionPlus(sample))) => Ok(ControllerItem::Event(
                ControllerEvent::MotionPlus(self.normalize_motion_plus(sample)),
            )),
            Some(Reading::Event(event)) => Ok(ControllerItem::Event(event)),
            Some(Reading::Gone) => Ok(ControllerItem::Gone),
            Some(Reading::Failed(err)) => Err(err),
            // The controller holds a sender, so the queue never closes while it lives
            None => Ok(ControllerItem::Gone),
        }
    }

    fn reopen(&mut self) -> Result<()> {
        self.stop_readers();

        // Fresh queue so readings from the old readers are not replayed
        let (sender, readings) = mpsc::channel(READING_QUEUE_DEPTH);
        self.sender = sender;
        self.readings = readings;

        let (syspath, nodes) = self.locator.scan()?;
        if !nodes.iter().any(|node| node.interface == Interface::Core) {
            return Err(PointerBridgeError::ControllerNotFound(syspath.display().to_string()));
        }
        self.syspath = syspath;

        for node in nodes {
            match self.spawn_reader(&node) {
                Ok(()) => {
                    debug!("Opened {:?} interface at {}", node.interface, node.devnode.display());
                    self.interfaces.push(node);
                }
                Err(source) if node.interface == Interface::Core => {
                    self.stop_readers();
                    return Err(PointerBridgeError::DeviceOpen {
                        path: node.devnode.display().to_string(),
                        source,
                    });
                }
                Err(e) => {
                    warn!("Failed to open {:?} interface at {}: {}", node.interface, node.devnode.display(), e);
                }
            }
        }

        info!(
            "Opened remote {} ({} interfaces)",
            self.syspath.display(),
            self.interfaces.len()
        );
        Ok(())
    }

    fn status(&self) -> ControllerStatus {
        read_status(&self.syspath)
    }
}

/// Reader task for one interface
///
/// `ENODEV` on the core interface reports the remote gone. On any other
/// interface it means the extension was unplugged and the reader just stops.
async fn read_interface(mut stream: EventStream, mut mapper: EventMapper, sender: mpsc::Sender<Reading>) {
    loop {
        let reading = match stream.next_event().await {
            Ok(event) => match mapper.process_event(&event) {
                Some(event) => Reading::Event(event),
                None => continue,
            },
            Err(err) if err.raw_os_error() == Some(ENODEV) => {
                if mapper.interface() == Interface::Core {
                    let _ = sender.send(Reading::Gone).await;
                } else {
                    debug!("{:?} interface removed", mapper.interface());
                }
                return;
            }
            Err(err) => {
                let transient = matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                );
                if sender.send(Reading::Failed(err)).await.is_err() || !transient {
                    return;
                }
                continue;
            }
        };

        if sender.send(reading).await.is_err() {
            return;
        }
    }
}
