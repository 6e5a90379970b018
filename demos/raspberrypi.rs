use ccs811::{Builder, DriveMode, DEFAULT_ADDRESS};
use embedded_hal::delay::DelayNs;
use linux_embedded_hal::{Delay, I2cdev};

fn main() {
    let i2c = I2cdev::new("/dev/i2c-1").expect("I2C device");

    //initialize the sensor through i2c
    let mut sensor = Builder::new_i2c(i2c, DEFAULT_ADDRESS);

    //you need to implement an delay_source
    let mut delay_source = Delay {};

    if !sensor.begin(&mut delay_source) {
        println!("CCS811 not found");
        return;
    }

    sensor
        .set_drive_mode(DriveMode::Mode1Sec)
        .expect("error set_drive_mode");
    // 21.5 °C, 45 %RH
    sensor
        .set_environment(21.5, 45)
        .expect("error set_environment");

    loop {
        let data = sensor.read_data();
        if data.valid {
            println!("eCO2: {} ppm  TVOC: {} ppb", data.eco2, data.tvoc);
        }
        delay_source.delay_ms(1000);
    }
}
