mod modlog_channel;
mod warning;
