//! Bluetooth module
//!
//! Advertises the watch, accepts one phone at a time and publishes the
//! connection state to the watchface.

use core::{
    mem,
    sync::atomic::{AtomicBool, Ordering},
};

use nrf_softdevice::{
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
            ServiceUuid16,
        },
        gatt_server, peripheral,
    },
    raw, Config, Softdevice,
};

use embassy_time::{Duration, Timer};

use canyon_watchface::{services::ConnectionService, ui::WindowEvent};

use super::EventSender;

const DEVICE_NAME: &[u8] = b"PineTime";
const MANUFACTURER_NAME: &[u8; 6] = b"Pine64";
const MODEL_NUMBER: &[u8; 8] = b"PineTime";

const ADVERTISING_RETRY: Duration = Duration::from_secs(1);

static CONNECTED: AtomicBool = AtomicBool::new(false);

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Complete, &[ServiceUuid16::DEVICE_INFORMATION])
    .full_name("PineTime")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::DEVICE_INFORMATION])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub dis: DeviceInformationService,
}

#[nrf_softdevice::gatt_service(uuid = "180a")]
pub struct DeviceInformationService {
    #[characteristic(uuid = "2a29", read)]
    pub manufacturer_name: [u8; 6],
    #[characteristic(uuid = "2a24", read)]
    pub model_number: [u8; 8],
}

/// SoftDevice configuration for a single peripheral link
pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        // S113 is peripheral only
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Connection state backed by the BLE task
pub struct BleConnection;

impl ConnectionService for BleConnection {
    fn is_connected(&self) -> bool {
        CONNECTED.load(Ordering::Relaxed)
    }
}

async fn set_connected(connected: bool, events: &EventSender) {
    CONNECTED.store(connected, Ordering::Relaxed);
    events.send(WindowEvent::ConnectionChanged(connected)).await;
}

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve one connection until it drops, repeat
#[embassy_executor::task]
pub async fn bluetooth(sd: &'static Softdevice, server: &'static Server, events: EventSender) -> ! {
    if let Err(e) = server
        .dis
        .manufacturer_name_set(MANUFACTURER_NAME)
        .and_then(|_| server.dis.model_number_set(MODEL_NUMBER))
    {
        defmt::warn!("Device information not set: {:?}", e);
    }

    let config = peripheral::Config::default();
    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {:?}", e);
                Timer::after(ADVERTISING_RETRY).await;
                continue;
            }
        };
        defmt::info!("Phone connected");
        set_connected(true, &events).await;

        let reason = gatt_server::run(&conn, server, |_| {}).await;
        defmt::info!("Phone disconnected: {:?}", reason);
        set_connected(false, &events).await;
    }
}
