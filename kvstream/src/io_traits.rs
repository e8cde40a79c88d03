//! `embedded_io` and `std::io` adapters for `StreamBuffer`
//!
//! Inherent methods of `StreamBuffer` shadow the trait methods of the same
//! name, so call these through the trait (`Read::read(&mut stream, buf)`) or
//! use the provided helpers (`read_to_end`, `write_all`, `std::io::copy`).
//!
//! Unlike [`StreamBuffer::seek`], trait seeks refuse a negative target.

use crate::buffer::StreamBuffer;
use crate::error::StreamError;
use crate::store::BackingStore;
use crate::whence::Whence;

impl<S: BackingStore + ?Sized> StreamBuffer<'_, S> {
    fn seek_checked(&mut self, offset: i64, whence: Whence) -> Result<u64, StreamError> {
        let target = self.seek_target(offset, whence)?;
        let Ok(position) = u64::try_from(target) else {
            return Err(StreamError::InvalidPosition(target));
        };
        self.seek(target, Whence::Start)?;
        Ok(position)
    }
}

fn split_seek_from(pos: embedded_io::SeekFrom) -> Result<(i64, Whence), StreamError> {
    match pos {
        embedded_io::SeekFrom::Start(n) => i64::try_from(n)
            .map(|n| (n, Whence::Start))
            .map_err(|_| StreamError::PositionOverflow),
        embedded_io::SeekFrom::Current(n) => Ok((n, Whence::Current)),
        embedded_io::SeekFrom::End(n) => Ok((n, Whence::End)),
    }
}

impl<S: BackingStore + ?Sized> embedded_io::ErrorType for StreamBuffer<'_, S> {
    type Error = StreamError;
}

impl<S: BackingStore + ?Sized> embedded_io::Read for StreamBuffer<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.read_into(buf)
    }
}

impl<S: BackingStore + ?Sized> embedded_io::Write for StreamBuffer<'_, S> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        StreamBuffer::write(self, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        StreamBuffer::flush(self)
    }
}

impl<S: BackingStore + ?Sized> embedded_io::Seek for StreamBuffer<'_, S> {
    fn seek(&mut self, pos: embedded_io::SeekFrom) -> Result<u64, Self::Error> {
        let (offset, whence) = split_seek_from(pos)?;
        self.seek_checked(offset, whence)
    }
}

impl<S: BackingStore + ?Sized> std::io::Read for StreamBuffer<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl<S: BackingStore + ?Sized> std::io::Write for StreamBuffer<'_, S> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(StreamBuffer::write(self, buf)?)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(StreamBuffer::flush(self)?)
    }
}

impl<S: BackingStore + ?Sized> std::io::Seek for StreamBuffer<'_, S> {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        let pos = match pos {
            std::io::SeekFrom::Start(n) => embedded_io::SeekFrom::Start(n),
            std::io::SeekFrom::Current(n) => embedded_io::SeekFrom::Current(n),
            std::io::SeekFrom::End(n) => embedded_io::SeekFrom::End(n),
        };
        let (offset, whence) = split_seek_from(pos)?;
        Ok(self.seek_checked(offset, whence)?)
    }
}
