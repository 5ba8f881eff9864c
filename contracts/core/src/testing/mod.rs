mod hook;
mod puppeteer;
mod util;
mod voucher;
