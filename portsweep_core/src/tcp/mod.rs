//! TCP probing.  The engine only does full open scanning: a port's state is
//! decided by attempting complete connection establishment, never by crafting
//! raw packets.

pub mod full_open;
