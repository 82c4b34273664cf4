use std::fs::File;
use std::io::{Read, Seek};

/// Opens a reference-stream file for reading
///
/// Reference files are consumed front to back exactly once, so on unix the
/// file is memory mapped with sequential access advice; elsewhere a plain
/// buffered reader is used
pub fn get_reader(file: File) -> std::io::Result<impl Read + Seek> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        const BUFFER_SIZE: usize = 64 * 1024;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    #[cfg(unix)]
    {
        use memmap2::{Advice, Mmap};
        use std::io::Cursor;
        let map = unsafe { Mmap::map(&file)? };
        map.advise(Advice::Sequential)?;
        Ok(Cursor::new(map))
    }
}
