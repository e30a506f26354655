use mlog::Logger;

fn main() {
    let log = Logger::get();

    // log to file log.txt
    if let Err(e) = log.set_file_writer("log.txt") {
        mlog::error!("{}", e);
    }

    println!("Messages without formatting:");
    mlog::debug!("Debug Message");
    mlog::notice!("Notice Message");
    mlog::error!("Error Message");
    mlog::info!("Info Message");
    mlog::warning!("Warning Message");

    println!();
    println!("Messages with formatting:");
    mlog::debug!("{}", "Debug Message");
    mlog::notice!("{}", "Notice Message");
    mlog::error!("{}", "Error Message");
    mlog::info!("{}", "Info Message");
    mlog::warning!("{}", "Warning Message");
    mlog::critical!("{}", "Critical Error, Program will exit after this call");
}
