mod lifecycle;
mod packets;
